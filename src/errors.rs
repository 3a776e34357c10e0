use std::path::PathBuf;

use log::error;
use rocket::http::Status;
use rocket::response::{self, Responder, Response};
use rocket::Request;
use snafu::Snafu;

pub type CustomResult<T> = Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{what} not found"))]
    NotFoundError { what: String },

    #[snafu(display("request to {url} failed: {source}"))]
    UpstreamRequestError { url: String, source: reqwest::Error },

    #[snafu(display("{url} answered with status {status}"))]
    UpstreamStatusError { url: String, status: u16 },

    #[snafu(display("could not decode response from {url}: {source}"))]
    UpstreamDecodeError { url: String, source: serde_json::Error },

    #[snafu(display("{message}"))]
    UpstreamFailureError { message: String },

    #[snafu(display("could not read {}: {source}", path.display()))]
    FileReadError { path: PathBuf, source: std::io::Error },

    #[snafu(display("could not write {}: {source}", path.display()))]
    FileWriteError { path: PathBuf, source: std::io::Error },

    #[snafu(display("invalid json in {}: {source}", path.display()))]
    FileDecodeError { path: PathBuf, source: serde_json::Error },

    #[snafu(display("could not render track map: {message}"))]
    RenderError { message: String },

    #[snafu(display("scraping failed: {message}"))]
    ScrapeError { message: String },

    #[snafu(display("invalid value for {key}: {message}"))]
    ConfigError { key: String, message: String },
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Error {
        Error::NotFoundError { what: what.into() }
    }

    pub fn upstream(message: impl Into<String>) -> Error {
        Error::UpstreamFailureError { message: message.into() }
    }

    /// # http status
    /// only missing data is a client facing error, everything else is on our side or upstream.
    pub fn status(&self) -> Status {
        match self {
            Error::NotFoundError { .. } => Status::NotFound,
            _ => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        if status == Status::InternalServerError {
            error!(target:"errors:respond_to", "{} failed: {}", request.uri(), self);
        }

        Response::build_from(self.to_string().respond_to(request)?)
            .status(status)
            .ok()
    }
}
