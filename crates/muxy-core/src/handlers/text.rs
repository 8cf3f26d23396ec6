//! Fixed text handler

use crate::handler::{Handler, HandlerFuture};
use crate::{Request, Response, ResponseBuilder, StatusCode};

/// Responds with the same status and plain-text body to every request
#[derive(Clone, Debug)]
pub struct Text {
    status: StatusCode,
    body: bytes::Bytes,
}

impl Text {
    /// `200 OK` with `body`
    pub fn new(body: impl Into<bytes::Bytes>) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    pub fn with_status(status: StatusCode, body: impl Into<bytes::Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn response(&self) -> Response {
        ResponseBuilder::new(self.status)
            .header("content-type", "text/plain; charset=utf-8")
            .body(self.body.clone())
            .build()
    }
}

impl Handler for Text {
    fn call(&self, _req: Request) -> HandlerFuture {
        let res = self.response();
        Box::pin(async move { res })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;

    #[tokio::test]
    async fn test_text() {
        let res = Text::new("bye").call(Request::new(Method::Get, "/hello")).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.content_type(), Some("text/plain; charset=utf-8"));
        assert_eq!(res.body_string().as_deref(), Some("bye"));
    }

    #[tokio::test]
    async fn test_text_with_status() {
        let res = Text::with_status(StatusCode(418), ":(")
            .call(Request::new(Method::Post, "/bye"))
            .await;
        assert_eq!(res.status, StatusCode(418));
        assert_eq!(res.body_string().as_deref(), Some(":("));
    }
}
