use anyhow::{Error, Result};
use mime_guess::{Mime, from_path, mime};
use std::{fs::File as FsFile, path::PathBuf};
use tiny_http::{Header, Response};

pub struct ServedFile {
    pub path: PathBuf,
    pub mime: Mime,
}

impl ServedFile {
    pub fn new(path: PathBuf) -> Self {
        let mime = from_path(&path).first_or_octet_stream();

        Self { path, mime }
    }

    pub fn response(&self) -> Result<Response<FsFile>> {
        let fs_file = FsFile::open(&self.path)?;
        let header = Header::from_bytes("content-type", self.content_type())
            .map_err(|_| Error::msg("Could not create header"))?;

        Ok(Response::from_file(fs_file).with_header(header))
    }

    // Word lists are UTF-8; announce the charset so browsers render accents
    // correctly instead of guessing.
    fn content_type(&self) -> String {
        if self.mime.type_() == mime::TEXT {
            format!("{}; charset=utf-8", self.mime.essence_str())
        } else {
            self.mime.essence_str().to_string()
        }
    }
}
