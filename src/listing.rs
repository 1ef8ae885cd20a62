use anyhow::Result;
use html_escape::encode_text;
use natord::compare_ignore_case;
use std::{fs::read_dir, io::Cursor, path::Path};
use tiny_http::{Header, Response};

struct Entry {
    name: String,
    is_dir: bool,
}

/// Directory listing page, shown for directories without an `index.html`.
pub struct Listing {
    url_path: String,
    entries: Vec<Entry>,
}

impl Listing {
    pub fn new(url_path: &str, dir: &Path) -> Result<Self> {
        let mut entries = vec![];

        for entry in read_dir(dir)? {
            let Ok(entry) = entry else { continue };
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            let is_dir = entry.file_type().is_ok_and(|file_type| file_type.is_dir());

            entries.push(Entry { name, is_dir });
        }

        entries.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| compare_ignore_case(&a.name, &b.name))
        });

        Ok(Self {
            url_path: url_path.trim_end_matches('/').to_string(),
            entries,
        })
    }
}

impl From<Listing> for Response<Cursor<Vec<u8>>> {
    fn from(value: Listing) -> Self {
        let title = if value.url_path.is_empty() {
            "/".to_string()
        } else {
            format!("{}/", value.url_path)
        };

        let mut entry_elements = String::new();

        for entry in &value.entries {
            let suffix = if entry.is_dir { "/" } else { "" };

            entry_elements += &format!(
                r#"<li><a href="{}/{}{suffix}">{}{suffix}</a></li>"#,
                value.url_path,
                entry.name,
                encode_text(&entry.name),
            );
        }

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="fr">
    <head>
        <title>{title}</title>
        <meta charset="utf-8" />
        <meta name="viewport" content="width=device-width, initial-scale=1.0" />
        <style>
            body {{
                font-family: Segoe UI, Arial, Helvetica, sans-serif;
                margin: 20px;
            }}

            li {{
                margin: 5px 0;
            }}
        </style>
    </head>
    <body>
        <h1>{title}</h1>
        <ul>{entry_elements}</ul>
    </body>
</html>
"#,
            title = encode_text(&title),
        );

        let mut response = Response::from_string(html);

        if let Ok(header) = Header::from_bytes("content-type", "text/html; charset=utf-8") {
            response = response.with_header(header);
        }

        response
    }
}
