//! Integration tests for the HTTP cart client

use std::io;

use rust_decimal::Decimal;
use testresult::TestResult;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};

use cartline::{
    api::{CartApi, CartApiError, HttpCartApi},
    fixtures::CartPageFixture,
    handler::CartHandler,
    ids::CartId,
    page::Page,
};

/// Serve exactly one canned response and hand back the request line.
async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> io::Result<(String, JoinHandle<io::Result<String>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;

        let mut request = Vec::new();
        let mut chunk = [0_u8; 1024];

        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut chunk).await?;

            if read == 0 {
                break;
            }

            request.extend(chunk.iter().take(read));
        }

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );

        socket.write_all(response.as_bytes()).await?;
        socket.shutdown().await?;

        let request = String::from_utf8_lossy(&request);

        Ok(request.lines().next().unwrap_or_default().to_string())
    });

    Ok((base_url, server))
}

/// Client that never routes loopback traffic through an environment proxy.
fn api(base_url: impl Into<String>) -> Result<HttpCartApi, reqwest::Error> {
    Ok(HttpCartApi::with_client(
        base_url,
        reqwest::Client::builder().no_proxy().build()?,
    ))
}

fn cart_id(raw: &str) -> Result<CartId, &'static str> {
    CartId::new(raw).ok_or("empty cart id")
}

#[tokio::test]
async fn plus_cart_sends_the_id_as_a_query_parameter() -> TestResult {
    let (base_url, server) = serve_once("200 OK", r#"{"quantity":5,"amount":10,"total":50}"#).await?;

    let update = api(base_url)?.plus_cart(cart_id("42")?).await?;

    assert_eq!(server.await??, "GET /pluscart?cart_id=42 HTTP/1.1");
    assert_eq!(update.quantity, 5);
    assert_eq!(update.amount, Decimal::from(10));
    assert_eq!(update.total, Decimal::from(50));

    Ok(())
}

#[tokio::test]
async fn minus_cart_hits_its_own_endpoint() -> TestResult {
    let (base_url, server) = serve_once("200 OK", r#"{"quantity":1,"amount":12.5,"total":82.5}"#).await?;

    let update = api(base_url)?.minus_cart(cart_id("9")?).await?;

    assert_eq!(server.await??, "GET /minuscart?cart_id=9 HTTP/1.1");
    assert_eq!(update.summary().amount_text(), "12.5");

    Ok(())
}

#[tokio::test]
async fn remove_cart_decodes_totals_only() -> TestResult {
    let (base_url, server) = serve_once("200 OK", r#"{"amount":0,"total":70}"#).await?;

    let update = api(format!("{base_url}/"))?.remove_cart(cart_id("3")?).await?;

    assert_eq!(server.await??, "GET /removecart?cart_id=3 HTTP/1.1");
    assert_eq!(update.total, Decimal::from(70));

    Ok(())
}

#[tokio::test]
async fn ids_are_url_encoded() -> TestResult {
    let (base_url, server) = serve_once("200 OK", r#"{"quantity":2,"amount":1,"total":1}"#).await?;

    api(base_url)?.plus_cart(cart_id("a b&c")?).await?;

    assert_eq!(server.await??, "GET /pluscart?cart_id=a+b%26c HTTP/1.1");

    Ok(())
}

#[tokio::test]
async fn non_success_status_is_an_unexpected_response() -> TestResult {
    let (base_url, server) = serve_once("500 Internal Server Error", "boom").await?;

    let result = api(base_url)?.plus_cart(cart_id("42")?).await;

    server.await??;

    assert!(
        matches!(result, Err(CartApiError::UnexpectedResponse(ref message)) if message.contains("500") && message.contains("boom")),
        "expected UnexpectedResponse, got {result:?}"
    );

    Ok(())
}

#[tokio::test]
async fn malformed_body_is_an_http_error() -> TestResult {
    let (base_url, server) = serve_once("200 OK", r#"{"amount":1}"#).await?;

    let result = api(base_url)?.plus_cart(cart_id("42")?).await;

    server.await??;

    assert!(
        matches!(result, Err(CartApiError::Http(_))),
        "expected Http error, got {result:?}"
    );

    Ok(())
}

#[tokio::test]
async fn handler_renders_what_the_server_answers() -> TestResult {
    let (base_url, server) = serve_once("200 OK", r#"{"quantity":5,"amount":10,"total":50}"#).await?;

    let fixture = CartPageFixture::build(&[("42", 4)], "40", "110")?;
    let line = fixture.line("42")?;

    let handler = CartHandler::new(api(base_url)?, fixture.page);

    handler.click(&line.plus).await?;

    assert_eq!(server.await??, "GET /pluscart?cart_id=42 HTTP/1.1");

    let page = handler.into_page();
    assert_eq!(page.text(&line.quantity), "5");
    assert_eq!(page.text(&fixture.subtotal), "10");
    assert_eq!(page.text(&fixture.total), "50");

    Ok(())
}
