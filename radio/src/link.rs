// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Line-oriented links to the radio control port.

use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use strum::{Display, EnumString};
use tracing::{debug, trace};

/// The transports a radio control port can be reached over. The NDR308 family
/// only offers its text protocol over TCP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Transport {
    Tcp,
}

/// A bidirectional, line-oriented control channel
pub trait Link {
    /// Send one line. The newline terminator is appended by the link.
    ///
    /// # Errors
    ///
    /// Fails if the line cannot be written.
    fn send_line(&mut self, line: &str) -> io::Result<()>;

    /// Read the next line, without its terminator. `None` signals the end of the stream.
    ///
    /// # Errors
    ///
    /// Fails on read errors, including the expiry of the link timeout.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

fn resolve(host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
    let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();
    if addrs.is_empty() {
        return Err(io::Error::new(
            ErrorKind::NotFound,
            format!("{host} did not resolve to any address"),
        ));
    }
    Ok(addrs)
}

/// Control link over a TCP stream
pub struct TcpLink {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl TcpLink {
    /// Connect to the first reachable address of `host`. `timeout` bounds the
    /// connection attempt and every subsequent read and write.
    ///
    /// # Errors
    ///
    /// Fails if the host does not resolve or no address accepts the connection.
    pub fn connect(host: &str, port: u16, timeout: Duration) -> io::Result<Self> {
        let mut last_err = None;
        for addr in resolve(host, port)? {
            debug!("Connecting to {addr} over tcp...");
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => return Self::from_stream(stream, timeout),
                Err(e) => {
                    debug!("Could not connect to {addr}: {e}");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| io::Error::from(ErrorKind::NotConnected)))
    }

    fn from_stream(stream: TcpStream, timeout: Duration) -> io::Result<Self> {
        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;
        stream.set_nodelay(true)?;
        let writer = stream.try_clone()?;
        Ok(Self {
            reader: BufReader::new(stream),
            writer,
        })
    }
}

impl Link for TcpLink {
    fn send_line(&mut self, line: &str) -> io::Result<()> {
        trace!("tcp tx: {line}");
        self.writer.write_all(format!("{line}\n").as_bytes())?;
        self.writer.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        trace!("tcp rx: {}", line.trim_end());
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
