use std::{
    cell::RefCell,
    io::Cursor,
    rc::Rc,
    sync::{Arc, Mutex},
};

use image::{ImageFormat, RgbaImage};
use url::Url;

use crate::{
    element::{ElementId, ImageElement},
    error::LoadError,
    loader::{OriginResolver, ResourceLoader, Transport},
};

pub fn png_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbaImage::new(1, 1)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

pub struct TestElement {
    id: ElementId,
    pub history: RefCell<Vec<String>>,
}

impl TestElement {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            id: ElementId::next(),
            history: RefCell::new(Vec::new()),
        })
    }

    pub fn src(&self) -> String {
        self.history.borrow().last().cloned().unwrap_or_default()
    }
}

impl ImageElement for TestElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn set_src(&self, src: &str) {
        self.history.borrow_mut().push(src.to_owned());
    }
}

/// Serves a png for every url except those containing `broken` or `panic`,
/// and remembers what was asked for.
#[derive(Clone, Default)]
pub struct MockTransport {
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, LoadError> {
        self.requests.lock().unwrap().push(url.to_string());
        if url.as_str().contains("broken") {
            return Err(LoadError::Status(404));
        }
        if url.as_str().contains("panic") {
            panic!("transport failed hard on {url}");
        }
        Ok(png_bytes())
    }
}

pub fn mock_loader() -> (ResourceLoader, MockTransport) {
    let transport = MockTransport::default();
    (
        ResourceLoader::new(transport.clone(), OriginResolver::default()),
        transport,
    )
}

/// One canned http response served to the first client that connects.
#[cfg(feature = "http")]
pub struct OneShotServer {
    pub port: u16,
    request: std::thread::JoinHandle<String>,
}

#[cfg(feature = "http")]
impl OneShotServer {
    /// `None` when the sandbox forbids binding localhost.
    pub fn start(status: &str, body: Vec<u8>) -> Option<Self> {
        use std::{
            io::{BufRead, BufReader, ErrorKind, Write},
            net::TcpListener,
            thread,
        };

        let listener = match TcpListener::bind("127.0.0.1:0") {
            Ok(listener) => listener,
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::PermissionDenied | ErrorKind::AddrNotAvailable
                ) =>
            {
                eprintln!("skipping: cannot bind localhost in this environment: {err}");
                return None;
            }
            Err(err) => panic!("bind localhost: {err}"),
        };
        let port = listener.local_addr().unwrap().port();
        let status = status.to_owned();

        let request = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut header = String::new();
            while reader.read_line(&mut header).unwrap() > 2 {
                header.clear();
            }

            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )
            .unwrap();
            stream.write_all(&body).unwrap();
            request_line.trim_end().to_owned()
        });

        Some(Self { port, request })
    }

    /// The request line the client sent, e.g. `GET /photo.png HTTP/1.1`.
    pub fn request_line(self) -> String {
        self.request.join().unwrap()
    }
}
