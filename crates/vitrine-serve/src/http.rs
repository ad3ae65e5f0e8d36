//! Minimal HTTP/1.1 framing over a TCP connection.
//!
//! One request per connection: the request head is read (bodies are
//! ignored), a single response is written with `Connection: close`, and
//! the socket is shut down.

use std::fmt;

use percent_encoding::percent_decode_str;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{Result, ServeError};

/// Upper bound on the request line plus headers
pub const MAX_HEAD_BYTES: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    RequestTimeout,
    HeaderTooLarge,
    Internal,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::Forbidden => 403,
            Status::NotFound => 404,
            Status::MethodNotAllowed => 405,
            Status::RequestTimeout => 408,
            Status::HeaderTooLarge => 431,
            Status::Internal => 500,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::Forbidden => "Forbidden",
            Status::NotFound => "Not Found",
            Status::MethodNotAllowed => "Method Not Allowed",
            Status::RequestTimeout => "Request Timeout",
            Status::HeaderTooLarge => "Request Header Fields Too Large",
            Status::Internal => "Internal Server Error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

/// A parsed request head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Percent-decoded path, without the query
    pub path: String,
    /// Raw query string (after `?`), if any
    pub query: Option<String>,
}

impl Request {
    /// Parse a request line such as `GET /markdown?file=a.md HTTP/1.1`.
    pub fn parse_request_line(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ServeError::BadRequest(format!("malformed request line: {line:?}")));
        };
        if parts.next().is_some() || !version.starts_with("HTTP/1.") {
            return Err(ServeError::BadRequest(format!("malformed request line: {line:?}")));
        }

        let (raw_path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (target, None),
        };
        let path = percent_decode_str(raw_path)
            .decode_utf8()
            .map_err(|_| ServeError::BadRequest("path is not valid UTF-8".into()))?
            .into_owned();

        Ok(Self {
            method: method.to_string(),
            path,
            query,
        })
    }

    /// Look up a query parameter, percent-decoded (`+` reads as a space).
    pub fn query_param(&self, name: &str) -> Result<Option<String>> {
        let Some(query) = &self.query else {
            return Ok(None);
        };
        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key == name {
                let value = value.replace('+', " ");
                let decoded = percent_decode_str(&value)
                    .decode_utf8()
                    .map_err(|_| ServeError::BadRequest(format!("{name} is not valid UTF-8")))?;
                return Ok(Some(decoded.into_owned()));
            }
        }
        Ok(None)
    }
}

/// Read the request head from `reader`, skipping over the headers.
///
/// Returns `Ok(None)` when the peer closed the connection before sending
/// anything.
pub async fn read_request<R>(reader: &mut R) -> Result<Option<Request>>
where
    R: AsyncBufRead + Unpin,
{
    let mut limited = reader.take(MAX_HEAD_BYTES as u64);

    let mut line = String::new();
    if limited.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    if !line.ends_with('\n') {
        return Err(ServeError::HeaderTooLarge);
    }
    let request = Request::parse_request_line(line.trim_end())?;

    loop {
        let mut header = String::new();
        let n = limited.read_line(&mut header).await?;
        if n == 0 {
            if limited.limit() == 0 {
                return Err(ServeError::HeaderTooLarge);
            }
            // Peer stopped sending mid-head; serve what we have
            break;
        }
        if header == "\r\n" || header == "\n" {
            break;
        }
    }

    Ok(Some(request))
}

pub enum Body {
    Bytes(Vec<u8>),
    /// Streamed from disk in `chunk_size` pieces
    File { file: File, len: u64, chunk_size: usize },
}

pub struct Response {
    pub status: Status,
    pub content_type: &'static str,
    pub body: Body,
}

impl Response {
    pub fn html(body: String) -> Self {
        Self {
            status: Status::Ok,
            content_type: "text/html; charset=utf-8",
            body: Body::Bytes(body.into_bytes()),
        }
    }

    pub fn markdown(file: File, len: u64, chunk_size: usize) -> Self {
        Self {
            status: Status::Ok,
            content_type: "text/markdown; charset=utf-8",
            body: Body::File {
                file,
                len,
                chunk_size: chunk_size.max(1),
            },
        }
    }

    pub fn error(err: &ServeError) -> Self {
        let status = err.status();
        let message = match status {
            Status::Internal => status.reason().to_string(),
            _ => err.to_string(),
        };
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: Body::Bytes(format!("{message}\n").into_bytes()),
        }
    }

    fn content_length(&self) -> u64 {
        match &self.body {
            Body::Bytes(bytes) => bytes.len() as u64,
            Body::File { len, .. } => *len,
        }
    }

    /// Write the response, streaming file bodies chunk by chunk.
    pub async fn write_to<W>(self, writer: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let mut head = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n",
            self.status,
            self.content_type,
            self.content_length()
        );
        if self.status == Status::MethodNotAllowed {
            head.push_str("Allow: GET\r\n");
        }
        head.push_str("\r\n");
        writer.write_all(head.as_bytes()).await?;

        match self.body {
            Body::Bytes(bytes) => writer.write_all(&bytes).await?,
            Body::File {
                file,
                len,
                chunk_size,
            } => stream_file(file, len, chunk_size, writer).await?,
        }
        writer.flush().await?;
        Ok(())
    }
}

async fn stream_file<R, W>(file: R, len: u64, chunk_size: usize, writer: &mut W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    // Never send more than the Content-Length we announced
    let mut file = file.take(len);
    let mut buf = vec![0u8; chunk_size];
    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n]).await?;
    }
    Ok(())
}
