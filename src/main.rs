use std::{io::Write, process::ExitCode};

use b12_apply::{Receipt, Result, SubmitterConfig};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("b12=info")).init();

    let result = run(SubmitterConfig::from_env());
    let code = report(result, &mut std::io::stdout(), &mut std::io::stderr());
    ExitCode::from(code)
}

fn run(config: Result<SubmitterConfig>) -> Result<Receipt> {
    config?.to_submitter()?.submit()
}

/// Print the receipt to `out` or the error to `err`, returning the process exit code.
fn report(result: Result<Receipt>, out: &mut impl Write, err: &mut impl Write) -> u8 {
    match result {
        Ok(receipt) => {
            let _ = writeln!(out, "{receipt}");
            0
        }
        Err(error) => {
            let _ = writeln!(err, "error: {error}");
            error.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use b12_apply::{Error, SubmitterConfig};
    use httpmock::prelude::*;
    use serde_json::json;

    use super::{report, run};

    fn config() -> b12_apply::Result<SubmitterConfig> {
        let vars = HashMap::from([
            ("FULL_NAME", "Ada Lovelace"),
            ("CV_LINK", "https://example.com/cv.pdf"),
            ("EMAIL", "ada@example.com"),
            ("REPOSITORY_LINK", "https://github.com/ada/apply"),
            ("ACTION_RUN_LINK", "https://github.com/ada/apply/actions/runs/1"),
            ("SIGNING_SECRET", "hunter2"),
        ]);
        SubmitterConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    fn report_to_strings(result: b12_apply::Result<b12_apply::Receipt>) -> (u8, String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = report(result, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn prints_receipt_and_exits_zero() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/apply/submission");
            then.status(200)
                .json_body(json!({"success": true, "receipt": "R123"}));
        });

        let config = config().map(|c| c.endpoint(server.url("/apply/submission")));
        let (code, out, err) = report_to_strings(run(config));

        mock.assert();
        assert_eq!(code, 0);
        assert_eq!(out, "R123\n");
        assert!(err.is_empty());
    }

    #[test]
    fn server_error_exits_one_with_diagnostic() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/apply/submission");
            then.status(500).body("boom");
        });

        let config = config().map(|c| c.endpoint(server.url("/apply/submission")));
        let (code, out, err) = report_to_strings(run(config));

        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.contains("500"), "{err}");
        assert!(err.contains("boom"), "{err}");
    }

    #[test]
    fn missing_variable_exits_two() {
        let (code, out, err) = report_to_strings(run(Err(Error::MissingVariable("EMAIL"))));

        assert_eq!(code, 2);
        assert!(out.is_empty());
        assert_eq!(err, "error: EMAIL is not set\n");
    }
}
