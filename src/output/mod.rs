pub mod print;


use anyhow::{anyhow, Result};
use snorlax::{Request, Response};

/// A piece of an output format such as `%R\n%H\n%B\n`.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum FormatItem {
    FirstLine,
    Headers,
    Body,
    Chars(String),
}

pub fn parse_format(format: &str) -> Result<Vec<FormatItem>> {
    let mut items = Vec::new();
    let mut chars = String::new();
    let mut escaped = false;
    for ch in format.chars() {
        if !escaped {
            if ch == '%' {
                escaped = true;
            } else {
                chars.push(ch);
            }
            continue;
        }
        escaped = false;
        let item = match ch {
            '%' => {
                chars.push('%');
                continue;
            }
            'R' => FormatItem::FirstLine,
            'H' => FormatItem::Headers,
            'B' => FormatItem::Body,
            _ => return Err(anyhow!("Invalid formatting character '{}'", ch)),
        };
        if !chars.is_empty() {
            items.push(FormatItem::Chars(std::mem::take(&mut chars)));
        }
        items.push(item);
    }
    if !chars.is_empty() {
        items.push(FormatItem::Chars(chars));
    }
    Ok(items)
}

fn prettify_body(body: &str) -> String {
    match serde_json::from_str(body) {
        Ok(serde_json::Value::Object(object)) => {
            serde_json::to_string_pretty(&object).unwrap_or_else(|_| String::from(body))
        }
        _ => String::from(body),
    }
}

pub trait Outputter {
    fn request(&mut self, request: &Request) -> Result<()>;
    fn response(&mut self, response: &mut Response) -> Result<()>;
}
