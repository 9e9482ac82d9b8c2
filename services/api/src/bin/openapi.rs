//! services/api/src/bin/openapi.rs
//!
//! Prints the OpenAPI 3.0 document of the trivia REST API.
//!
//! Usage: `openapi [PATH]`. Without a path the document is written to
//! `openapi.json`; a path of `-` writes it to stdout for piping into other tools.

use api_lib::web::rest::ApiDoc;
use std::io::Write;
use utoipa::OpenApi;

const DEFAULT_PATH: &str = "openapi.json";

/// Where the rendered document goes.
#[derive(Debug, PartialEq, Eq)]
enum Output {
    Stdout,
    File(String),
}

impl Output {
    fn from_arg(arg: Option<String>) -> Self {
        match arg.as_deref() {
            Some("-") => Self::Stdout,
            Some(path) => Self::File(path.to_string()),
            None => Self::File(DEFAULT_PATH.to_string()),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let spec_json = ApiDoc::openapi().to_pretty_json()?;

    match Output::from_arg(std::env::args().nth(1)) {
        Output::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(spec_json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
        Output::File(path) => {
            std::fs::write(&path, spec_json)?;
            eprintln!("OpenAPI specification written to {}", path);
        }
    }
    Ok(())
}
