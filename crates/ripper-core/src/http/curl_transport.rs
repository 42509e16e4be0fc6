//! libcurl-backed transport: one Easy handle per attempt.

use super::{ClientOptions, HttpResponse, Transport};
use crate::retry::FetchError;

/// Blocking GET via the curl crate. Runs in the calling thread.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    options: ClientOptions,
}

impl CurlTransport {
    pub fn new(options: ClientOptions) -> Self {
        Self { options }
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.useragent(&self.options.user_agent)?;
        easy.connect_timeout(self.options.connect_timeout)?;
        easy.timeout(self.options.timeout)?;
        // Empty string = accept every encoding libcurl can decode.
        easy.accept_encoding("")?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        Ok(HttpResponse { status, body })
    }
}
