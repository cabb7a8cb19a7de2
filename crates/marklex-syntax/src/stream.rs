//! Scanning on a worker thread with a rendezvous hand-off.
//!
//! The producer blocks on every token until the consumer takes it, so it can
//! never run ahead. Dropping the [`TokenStream`] disconnects the channel; the
//! producer notices on its next send and stops.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::options::ScanOptions;
use crate::scanner::Scanner;
use crate::token::Token;

/// Consumer end of a threaded scan. Yields owned tokens in source order.
pub struct TokenStream {
    rx: Option<Receiver<Token<'static>>>,
    producer: Option<JoinHandle<usize>>,
}

/// Start scanning `source` on a new thread.
pub fn spawn(source: String, options: ScanOptions) -> TokenStream {
    let (tx, rx) = mpsc::sync_channel(0);
    let producer = thread::spawn(move || {
        let mut delivered = 0;
        for token in Scanner::with_options(&source, options) {
            if tx.send(token.into_owned()).is_err() {
                log::debug!("consumer stopped after {delivered} tokens, halting scan");
                break;
            }
            delivered += 1;
        }
        delivered
    });
    TokenStream {
        rx: Some(rx),
        producer: Some(producer),
    }
}

impl TokenStream {
    /// Stop the producer and wait for it. Returns how many tokens it handed over.
    pub fn cancel(mut self) -> usize {
        self.shutdown()
    }

    fn shutdown(&mut self) -> usize {
        drop(self.rx.take());
        match self.producer.take().map(JoinHandle::join) {
            Some(Ok(delivered)) => delivered,
            Some(Err(payload)) => std::panic::resume_unwind(payload),
            None => 0,
        }
    }
}

impl Iterator for TokenStream {
    type Item = Token<'static>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rx.as_ref()?.recv().ok()
    }
}

impl Drop for TokenStream {
    fn drop(&mut self) {
        if thread::panicking() {
            drop(self.rx.take());
            return;
        }
        self.shutdown();
    }
}
