use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE, LOCATION};
use hyper::{Method, Response, StatusCode};
use url::Url;

use super::ForwardError;

/// 302 응답을 만듭니다. GET 요청에는 대상 링크를 담은 짧은 HTML 본문을 붙입니다.
pub fn redirect_response(target: &Url, method: &Method) -> Result<Response<Full<Bytes>>, ForwardError> {
    let location = HeaderValue::from_str(target.as_str()).map_err(|e| ForwardError::InvalidHeader {
        name: "Location",
        reason: e.to_string(),
    })?;

    let body = if method == Method::GET {
        Bytes::from(format!("<a href=\"{}\">Found</a>.\n", html_escape(target.as_str())))
    } else {
        Bytes::new()
    };
    let has_body = !body.is_empty();

    let mut response = Response::new(Full::new(body));
    *response.status_mut() = StatusCode::FOUND;
    response.headers_mut().insert(LOCATION, location);
    if has_body {
        response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
    }
    Ok(response)
}

fn html_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_redirect_response() {
        let target = Url::parse("https://de.example.com/p?a=1").unwrap();
        let response = redirect_response(&target, &Method::GET).unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "https://de.example.com/p?a=1");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&body).contains("https://de.example.com/p?a=1"));
    }

    #[tokio::test]
    async fn test_redirect_body_escapes_query_separator() {
        let target = Url::parse("https://de.example.com/p?a=1&b=2").unwrap();
        let response = redirect_response(&target, &Method::GET).unwrap();

        // 헤더에는 원래 URL, 본문 링크에는 HTML 이스케이프된 URL
        assert_eq!(response.headers()[LOCATION], "https://de.example.com/p?a=1&b=2");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(
            String::from_utf8_lossy(&body),
            "<a href=\"https://de.example.com/p?a=1&amp;b=2\">Found</a>.\n"
        );
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a&b<c>\"d'"), "a&amp;b&lt;c&gt;&#34;d&#39;");
        assert_eq!(html_escape("https://us.example.com/"), "https://us.example.com/");
    }

    #[tokio::test]
    async fn test_redirect_without_body_for_post() {
        let target = Url::parse("https://us.example.com/form").unwrap();
        let response = redirect_response(&target, &Method::POST).unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert!(response.headers().get(CONTENT_TYPE).is_none());
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }
}
