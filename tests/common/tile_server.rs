//! 集成测试用的最小 HTTP/1.1 服务器
//!
//! 对所有 GET 请求返回相同的状态码和响应体，并记录请求路径，
//! 方便测试统计实际发出的网络请求数以及同时在处理中的请求峰值。

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct TileServerOptions {
    /// 读到请求后延迟多久再响应
    pub delay: Duration,
    /// 为 true 时声明的 Content-Length 大于实际发送的字节数
    pub truncate_body: bool,
}

#[derive(Default)]
struct Stats {
    requests: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

pub struct TileServer {
    /// 带结尾斜杠的地址，如 "http://127.0.0.1:12345/"
    pub url: String,
    stats: Arc<Stats>,
}

impl TileServer {
    pub fn endpoint(&self) -> String {
        format!("{}maps/api/staticmap", self.url)
    }

    pub fn request_count(&self) -> usize {
        self.stats.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.stats.requests.lock().unwrap().clone()
    }

    /// 同时处理中的请求数的最大值
    pub fn peak_in_flight(&self) -> usize {
        self.stats.peak.load(Ordering::SeqCst)
    }
}

/// 在后台线程启动服务器，直到进程退出
pub fn start(status: u16, body: Vec<u8>) -> TileServer {
    start_with_options(status, body, TileServerOptions::default())
}

pub fn start_with_options(status: u16, body: Vec<u8>, opts: TileServerOptions) -> TileServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let stats = Arc::new(Stats::default());
    let shared = Arc::clone(&stats);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let stats = Arc::clone(&shared);
            thread::spawn(move || handle(stream, status, &body, &stats, opts));
        }
    });
    TileServer {
        url: format!("http://127.0.0.1:{}/", port),
        stats,
    }
}

/// 返回一个没有任何进程监听的端口上的地址
pub fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/maps/api/staticmap", port)
}

fn handle(mut stream: TcpStream, status: u16, body: &[u8], stats: &Stats, opts: TileServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let request = String::from_utf8_lossy(&request);
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();
    stats.requests.lock().unwrap().push(target);

    let current = stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    stats.peak.fetch_max(current, Ordering::SeqCst);
    if !opts.delay.is_zero() {
        thread::sleep(opts.delay);
    }

    let declared = if opts.truncate_body {
        body.len() + 100
    } else {
        body.len()
    };
    let reason = if status == 200 { "OK" } else { "Error" };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status, reason, declared
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();

    stats.in_flight.fetch_sub(1, Ordering::SeqCst);
}
