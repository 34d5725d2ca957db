//! Helpers shared by unit tests.

use crate::config::Config;
use crate::shell::Shell;
use ash_types::Context;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::os::unix::io::AsRawFd;

/// Context whose stdout and stderr land in temp files
pub struct Captured {
    pub ctx: Context,
    out: File,
    err: File,
}

impl Captured {
    pub fn new() -> Self {
        let out = tempfile::tempfile().unwrap();
        let err = tempfile::tempfile().unwrap();
        let ctx = Context::with_output(out.as_raw_fd(), err.as_raw_fd());
        Captured { ctx, out, err }
    }

    pub fn stdout(&mut self) -> String {
        read_all(&mut self.out)
    }

    pub fn stderr(&mut self) -> String {
        read_all(&mut self.err)
    }
}

fn read_all(file: &mut File) -> String {
    let mut buf = String::new();
    file.seek(SeekFrom::Start(0)).unwrap();
    file.read_to_string(&mut buf).unwrap();
    buf
}

/// Shell with tips switched off so output is deterministic
pub fn quiet_shell() -> Shell {
    Shell::new(Config {
        tip_interval: 0,
        ..Config::default()
    })
}
