use std::cell::RefCell;
use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::thread;

use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};

use crate::error::FetchError;
use crate::fetch::Fetch;

pub mod fixtures;
pub mod wayback_tests;

/// Canned responses keyed by a substring of the requested URL. The first
/// matching route wins; unmatched URLs answer 404.
#[derive(Default)]
pub struct ScriptedFetcher {
    routes: Vec<(String, Result<Vec<u8>, u16>)>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, pattern: &str, body: impl Into<Vec<u8>>) -> Self {
        self.routes.push((pattern.to_string(), Ok(body.into())));
        self
    }

    pub fn fail(mut self, pattern: &str, status: u16) -> Self {
        self.routes.push((pattern.to_string(), Err(status)));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Fetch for ScriptedFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        match self.routes.iter().find(|(pattern, _)| url.contains(pattern.as_str())) {
            Some((_, Ok(body))) => Ok(body.clone()),
            Some((_, Err(status))) => Err(FetchError::Status(*status)),
            None => Err(FetchError::Status(404)),
        }
    }
}

/// PNG bytes of a `width` x `height` image filled with one color.
pub fn solid_png(rgb: [u8; 3], width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb(rgb));
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut bytes, ImageOutputFormat::Png)
        .unwrap();
    bytes.into_inner()
}

/// Serve exactly one HTTP response on a local port and return its base URL.
pub fn serve_once(status_line: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{}/", address)
}
