use crate::output::{prettify_body, FormatItem, Outputter};
use anyhow::Result;
use http::HeaderMap;
use snorlax::{Request, Response};
use std::io::Write;

pub struct FormattedOutputter<'a, W: Write> {
    writer: &'a mut W,
    request_format: Vec<FormatItem>,
    response_format: Vec<FormatItem>,
}

impl<'a, W: Write> FormattedOutputter<'a, W> {
    pub fn new(
        writer: &'a mut W,
        request_format: Vec<FormatItem>,
        response_format: Vec<FormatItem>,
    ) -> FormattedOutputter<'a, W> {
        FormattedOutputter {
            writer,
            request_format,
            response_format,
        }
    }

    fn write(&mut self, format: &[FormatItem], first_line: &str, headers: &HeaderMap, body: &str) -> Result<()> {
        for format_item in format {
            let to_write = match format_item {
                FormatItem::FirstLine => first_line.to_string(),
                FormatItem::Headers => format_headers(headers),
                FormatItem::Body => prettify_body(body),
                FormatItem::Chars(s) => s.clone(),
            };
            self.writer.write_all(to_write.as_bytes())?;
        }
        Ok(())
    }
}

fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(key, value)| format!("{}: {}\n", key, String::from_utf8_lossy(value.as_bytes())))
        .collect()
}

impl<'a, W: Write> Outputter for FormattedOutputter<'a, W> {
    fn request(&mut self, request: &Request) -> Result<()> {
        let first_line = format!("{} {}", request.method(), request.uri());
        let body = match request.body().as_bytes() {
            Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            None => String::from("<stream>"),
        };
        let format = self.request_format.clone();
        self.write(&format, &first_line, request.headers(), &body)
    }

    fn response(&mut self, response: &mut Response) -> Result<()> {
        let first_line = format!("{:?} {}", response.version(), response.status());
        // The body can only be read once, so only read it when it is printed.
        let body = if self.response_format.contains(&FormatItem::Body) {
            String::from_utf8_lossy(&response.raw_body()?).into_owned()
        } else {
            String::new()
        };
        let format = self.response_format.clone();
        self.write(&format, &first_line, response.headers(), &body)
    }
}
