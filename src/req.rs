use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

use crate::constants::{MAX_BODY_BYTES, MAX_HEAD_BYTES};

#[derive(Debug, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
}

impl TryFrom<&str> for Method {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, anyhow::Error> {
        match value {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            _ => Err(anyhow::anyhow!("Method not supported")),
        }
    }
}

pub struct Request {
    pub method: Method,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Request {
    /// Reads one HTTP/1.1 request: head up to the blank line, then
    /// `Content-Length` bytes of body.
    pub async fn new<Reader>(reader: Reader) -> Result<Self>
    where
        Reader: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(reader);

        let mut head = String::new();
        {
            let mut limited = (&mut reader).take(MAX_HEAD_BYTES as u64 + 1);
            loop {
                let mut line = String::new();
                let read = limited
                    .read_line(&mut line)
                    .await
                    .context("Failed to read head")?;
                if limited.limit() == 0 {
                    bail!("Head too large");
                }
                if read == 0 || line == "\r\n" || line == "\n" {
                    break;
                }
                head.push_str(&line);
            }
        }

        let mut request = Self::parse_head(&head)?;

        let length = match request.headers.get("content-length") {
            Some(value) => value
                .parse::<usize>()
                .context("Invalid Content-Length")?,
            None => 0,
        };
        if length > MAX_BODY_BYTES {
            bail!("Body too large");
        }
        let mut body = vec![0; length];
        reader
            .read_exact(&mut body)
            .await
            .context("Body shorter than Content-Length")?;
        request.body = String::from_utf8(body).context("Body is not UTF-8")?;

        Ok(request)
    }

    fn parse_head(head: &str) -> Result<Self> {
        // Method and path
        let mut head_line = head.lines();
        let first = head_line.next().context("Empty Request")?;
        let mut request_parts = first.split_whitespace();
        let method: Method = request_parts
            .next()
            .ok_or(anyhow::anyhow!("missing method"))
            .and_then(TryInto::try_into)
            .context("Missing Method")?;
        let target = request_parts.next().context("No Path")?;
        let path = target.split_once('?').map_or(target, |(path, _)| path);

        // Headers
        let mut headers = HashMap::new();
        for line in head_line {
            if let Some((k, v)) = line.split_once(":") {
                headers.insert(k.trim().to_lowercase(), v.trim().to_string());
            }
        }
        Ok(Request {
            method,
            path: path.into(),
            headers,
            body: String::new(),
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }
}
