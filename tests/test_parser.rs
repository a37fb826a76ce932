use depot::http::parser::{
    find_headers_end, parse_http_request, parse_http_request_limited, ParseError,
};
use depot::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.target, "/");
    assert_eq!(parsed.header_lines, vec!["Host: example.com".to_string()]);
    assert!(parsed.body.is_empty());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_put_request_with_body() {
    let req = b"PUT /notes.txt HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::PUT);
    assert_eq!(parsed.path, "/notes.txt");
    assert_eq!(parsed.body, b"hello".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_body_without_content_length_takes_rest_of_buffer() {
    let req = b"POST /notes.txt HTTP/1.1\r\nHost: localhost\r\n\r\n world";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b" world".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_content_length_frames_body_exactly() {
    let req = b"PUT /a.txt HTTP/1.1\r\nContent-Length: 3\r\n\r\nabcEXTRA";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"abc".to_vec());
    assert_eq!(consumed, req.len() - "EXTRA".len());
}

#[test]
fn test_parse_content_length_is_case_insensitive() {
    let req = b"PUT /a.txt HTTP/1.1\r\ncontent-length: 10\r\n\r\nhello";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_header_lines_kept_verbatim_and_in_order() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nX-Odd:   spaced  \r\nBrokenHeader\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(
        parsed.header_lines,
        vec![
            "Host: example.com".to_string(),
            "X-Odd:   spaced  ".to_string(),
            "BrokenHeader".to_string(),
        ]
    );
}

#[test]
fn test_parse_request_with_path_and_query_string() {
    let req = b"GET /search.txt?q=rust&page=2 HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.target, "/search.txt?q=rust&page=2");
    assert_eq!(parsed.path, "/search.txt");
    assert_eq!(parsed.query.as_deref(), Some("q=rust&page=2"));
}

#[test]
fn test_parse_percent_encoded_path_is_decoded() {
    let req = b"GET /my%20notes.txt HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/my notes.txt");
    assert_eq!(parsed.target, "/my%20notes.txt");
}

#[test]
fn test_parse_dot_segments_are_normalized() {
    let req = b"GET /a/../b.txt HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/b.txt");
}

#[test]
fn test_parse_absolute_form_target() {
    let req = b"GET http://example.com/notes.txt HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/notes.txt");
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_incomplete_request_partial_body() {
    let req = b"PUT /api.txt HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_unknown_method_is_kept() {
    let req = b"PATCH /anything HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::Other("PATCH".to_string()));
}

#[test]
fn test_parse_empty_request_line() {
    let req = b"\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::Other(String::new()));
    assert_eq!(parsed.path, "/");
    assert_eq!(consumed, 4);
}

#[test]
fn test_parse_missing_target_resolves_to_root() {
    let req = b"GET\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.target, "");
    assert_eq!(parsed.path, "/");
}

#[test]
fn test_parse_invalid_content_length_takes_rest_of_buffer() {
    let req = b"PUT /a.txt HTTP/1.1\r\nContent-Length: lots\r\n\r\nabc";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::PUT);
    assert_eq!(parsed.body, b"abc".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_non_utf8_header_block() {
    let req = b"GET /a.txt HTTP/1.1\r\nX-Name: caf\xe9\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/a.txt");
    assert_eq!(parsed.header("X-Name"), Some("caf\u{fffd}"));
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_headers_too_large() {
    let req = vec![b'a'; 100];
    let result = parse_http_request_limited(&req, 50);

    assert!(matches!(result, Err(ParseError::HeadersTooLarge)));
}

#[test]
fn test_parse_limit_only_applies_before_terminator() {
    let mut req = b"PUT /a.txt HTTP/1.1\r\nContent-Length: 100\r\n\r\n".to_vec();
    req.extend_from_slice(&[b'x'; 100]);
    let (parsed, _) = parse_http_request_limited(&req, 64).unwrap();

    assert_eq!(parsed.body.len(), 100);
}

#[test]
fn test_parse_various_http_methods() {
    let methods = vec![
        ("GET", Method::GET),
        ("HEAD", Method::HEAD),
        ("PUT", Method::PUT),
        ("POST", Method::POST),
        ("DELETE", Method::DELETE),
        ("OPTIONS", Method::OPTIONS),
    ];

    for (method_str, expected_method) in methods {
        let req = format!("{} / HTTP/1.1\r\n\r\n", method_str);
        let (parsed, _) = parse_http_request(req.as_bytes()).unwrap();
        assert_eq!(parsed.method, expected_method);
    }
}

#[test]
fn test_parse_request_with_binary_body() {
    let req = b"PUT /blob.bin HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\x01\xff\x03";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, vec![0, 1, 255, 3]);
}

#[test]
fn test_find_headers_end_first_occurrence() {
    let buf = b"GET / HTTP/1.1\r\n\r\nbody\r\n\r\n";
    assert_eq!(find_headers_end(buf), Some(14));
    assert_eq!(find_headers_end(b"GET / HTTP/1.1\r\n"), None);
}
