use secrecy::SecretString;

use crate::{Error, Result, Submitter};

/// Environment variable holding the applicant's full name.
pub const FULL_NAME: &str = "FULL_NAME";
/// Environment variable holding the link to the applicant's CV.
pub const CV_LINK: &str = "CV_LINK";
/// Environment variable holding the applicant's email address.
pub const EMAIL: &str = "EMAIL";
/// Environment variable holding the link to the source repository.
pub const REPOSITORY_LINK: &str = "REPOSITORY_LINK";
/// Environment variable holding the link to the CI run performing the submission.
pub const ACTION_RUN_LINK: &str = "ACTION_RUN_LINK";
/// Environment variable holding the shared HMAC secret.
pub const SIGNING_SECRET: &str = "SIGNING_SECRET";

/// Required variables, in the order they are checked.
pub const REQUIRED_VARIABLES: [&str; 6] = [
    FULL_NAME,
    CV_LINK,
    EMAIL,
    REPOSITORY_LINK,
    ACTION_RUN_LINK,
    SIGNING_SECRET,
];

/// Configuration for [`Submitter`].
///
/// # Examples
/// ```no_run
/// # use b12_apply::SubmitterConfig;
/// let receipt = SubmitterConfig::from_env()?.to_submitter()?.submit()?;
/// println!("{receipt}");
/// # Ok::<(), b12_apply::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct SubmitterConfig {
    pub(crate) full_name: String,
    pub(crate) cv_link: String,
    pub(crate) email: String,
    pub(crate) repository_link: String,
    pub(crate) action_run_link: String,
    pub(crate) signing_secret: SecretString,
    pub(crate) endpoint: String,
}

impl SubmitterConfig {
    /// Default submission endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://b12.io/apply/submission";

    /// Read configuration from the process environment.
    ///
    /// Fails with [`Error::MissingVariable`] naming the first required variable that is unset or
    /// empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    ///
    /// ```
    /// # use std::collections::HashMap;
    /// # use b12_apply::{Error, SubmitterConfig};
    /// let vars = HashMap::from([("FULL_NAME", "Ada Lovelace")]);
    /// let err = SubmitterConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
    /// assert!(matches!(err, Err(Error::MissingVariable("CV_LINK"))));
    /// ```
    pub fn from_lookup(mut lookup: impl FnMut(&str) -> Option<String>) -> Result<Self> {
        let mut require = |key: &'static str| match lookup(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(Error::MissingVariable(key)),
        };

        let full_name = require(FULL_NAME)?;
        let cv_link = require(CV_LINK)?;
        let email = require(EMAIL)?;
        let repository_link = require(REPOSITORY_LINK)?;
        let action_run_link = require(ACTION_RUN_LINK)?;
        let signing_secret = SecretString::from(require(SIGNING_SECRET)?);

        Ok(SubmitterConfig {
            full_name,
            cv_link,
            email,
            repository_link,
            action_run_link,
            signing_secret,
            endpoint: Self::DEFAULT_ENDPOINT.to_owned(),
        })
    }

    /// Override the submission endpoint. The binary always uses [`Self::DEFAULT_ENDPOINT`].
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Create a new [`Submitter`] using this configuration.
    pub fn to_submitter(self) -> Result<Submitter> {
        Submitter::new(self)
    }
}
