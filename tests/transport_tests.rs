use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use textaction::config::{ProviderConfig, TransportConfig};
use textaction::error::{Error, ErrorKind};
use textaction::request::ChatCompletionRequest;
use textaction::{CompletionTransport, HttpTransport};

/// Serve exactly one HTTP response and hand back the raw request
async fn serve_once(status: &str, body: &str)
  -> (String, JoinHandle<String>)
{   let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
      "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
       Content-Length: {}\r\nConnection: close\r\n\r\n{}",
      status, body.len(), body
    );

    let handle = tokio::spawn(async move {
      let (mut socket, _) = listener.accept().await.unwrap();
      let request = read_request(&mut socket).await;
      socket.write_all(response.as_bytes()).await.unwrap();
      let _ = socket.shutdown().await;
      request
    });

    (format!("http://{}", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> String
{   let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop
    {   let n = socket.read(&mut chunk).await.unwrap();
        if n == 0
        {   break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(head_end) = text.find("\r\n\r\n")
        {   let content_length = text[..head_end]
              .lines()
              .filter_map(|line| line.split_once(':'))
              .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
              .and_then(|(_, value)| value.trim().parse::<usize>().ok())
              .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length
            {   break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn request_body(raw: &str) -> serde_json::Value
{   let (_, body) = raw.split_once("\r\n\r\n").unwrap();
    serde_json::from_str(body).unwrap()
}

fn provider(base_url: &str) -> ProviderConfig
{   let mut provider = ProviderConfig::ollama_default();
    provider.base_url = base_url.to_string();
    provider
      .headers
      .insert("Authorization".to_string(), "Bearer secret".to_string());
    provider
}

fn transport() -> HttpTransport
{   HttpTransport::new(&TransportConfig { timeout_secs: Some(10) }).unwrap()
}

#[tokio::test]
async fn test_models_list_openai_shape()
{   let (base, server) = serve_once(
      "200 OK",
      r#"{"object":"list","data":[{"id":"llama3","object":"model"},{"id":"qwen2"}]}"#
    ).await;

    let models = transport()
      .get_models_list(&provider(&base))
      .await
      .unwrap();
    assert_eq!(models, vec!["llama3".to_string(), "qwen2".to_string()]);

    let raw = server.await.unwrap();
    assert!(raw.starts_with("GET /v1/models "));
    assert!(raw.to_lowercase().contains("authorization: bearer secret"));
}

#[tokio::test]
async fn test_models_list_ollama_tags_shape()
{   let (base, server) = serve_once(
      "200 OK",
      r#"{"models":[{"name":"mistral:latest","size":1}]}"#
    ).await;

    let mut provider = provider(&base);
    provider.models_endpoint = "/api/tags".to_string();
    let models = transport().get_models_list(&provider).await.unwrap();
    assert_eq!(models, vec!["mistral:latest".to_string()]);

    let raw = server.await.unwrap();
    assert!(raw.starts_with("GET /api/tags "));
}

#[tokio::test]
async fn test_completion_returns_first_choice()
{   let (base, server) = serve_once(
      "200 OK",
      r#"{"choices":[
           {"index":0,"message":{"role":"assistant","content":"first"},"finish_reason":"stop"},
           {"index":1,"message":{"role":"assistant","content":"second"}}
         ],
         "usage":{"prompt_tokens":5,"completion_tokens":1,"total_tokens":6}}"#
    ).await;

    let mut request = ChatCompletionRequest::new("llama3", "sys", "user");
    request.temperature = Some(0.5);
    request.options = Some(textaction::request::OllamaOptions
    {   temperature: Some(0.5)
    });

    let content = transport()
      .get_completion_response(&provider(&base), &request)
      .await
      .unwrap();
    assert_eq!(content, "first");

    let raw = server.await.unwrap();
    assert!(raw.starts_with("POST /v1/chat/completions "));
    let body = request_body(&raw);
    assert_eq!(body["model"], "llama3");
    assert_eq!(body["stream"], false);
    assert_eq!(body["n"], 1);
    assert_eq!(body["temperature"], 0.5);
    assert_eq!(body["options"]["temperature"], 0.5);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["content"], "user");
}

#[tokio::test]
async fn test_completion_omits_unset_sampling_fields()
{   let (base, server) = serve_once(
      "200 OK",
      r#"{"choices":[{"message":{"role":"assistant","content":"ok"}}]}"#
    ).await;

    let request = ChatCompletionRequest::new("llama3", "sys", "user");
    transport()
      .get_completion_response(&provider(&base), &request)
      .await
      .unwrap();

    let body = request_body(&server.await.unwrap());
    assert!(body.get("temperature").is_none());
    assert!(body.get("options").is_none());
}

#[tokio::test]
async fn test_completion_without_choices()
{   let (base, _server) = serve_once("200 OK", r#"{"choices":[]}"#).await;

    let request = ChatCompletionRequest::new("llama3", "sys", "user");
    let err = transport()
      .get_completion_response(&provider(&base), &request)
      .await
      .unwrap_err();

    assert_eq!(err, Error::NoChoicesInResponse);
    assert!(err.to_string().contains("no choices returned"));
}

#[tokio::test]
async fn test_error_status_is_api_error()
{   let (base, _server) = serve_once(
      "404 Not Found",
      r#"{"error":"model not found"}"#
    ).await;

    let request = ChatCompletionRequest::new("missing", "sys", "user");
    let err = transport()
      .get_completion_response(&provider(&base), &request)
      .await
      .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(matches!(err, Error::ApiError(ref msg) if msg.contains("model not found")));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error()
{   let (base, _server) = serve_once("200 OK", "not json").await;

    let err = transport()
      .get_models_list(&provider(&base))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::ParseError(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_http_error()
{   let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = transport()
      .get_models_list(&provider(&format!("http://{}", addr)))
      .await
      .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[test]
fn test_timeout_is_transport_error()
{   assert_eq!(Error::Timeout.kind(), ErrorKind::Transport);
    let wrapped = Error::Timeout.context("failed to get models list from ollama");
    assert_eq!(wrapped.kind(), ErrorKind::Transport);
    assert_eq!(wrapped.root(), &Error::Timeout);
}
