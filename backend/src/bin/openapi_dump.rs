//! Print the OpenAPI document as JSON.

use std::io::{self, Write};
use std::process::ExitCode;

use review_service::ApiDoc;
use utoipa::OpenApi;

fn main() -> ExitCode {
    let rendered = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|error| error.to_string())
        .and_then(|json| {
            writeln!(io::stdout().lock(), "{json}").map_err(|error| error.to_string())
        });
    match rendered {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            if writeln!(io::stderr().lock(), "openapi-dump: {message}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}
