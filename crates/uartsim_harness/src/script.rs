/// One step of a scripted conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub expect: Vec<u8>,
    pub reply: Option<Vec<u8>>,
}

impl Exchange {
    pub fn new(expect: impl Into<Vec<u8>>) -> Self {
        Self {
            expect: expect.into(),
            reply: None,
        }
    }

    pub fn reply(mut self, reply: impl Into<Vec<u8>>) -> Self {
        self.reply = Some(reply.into());
        self
    }
}

/// What the driver should do after a byte has been fed to a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptAction {
    Continue,
    Send(Vec<u8>),
    Done,
}

/// Question/answer driver.
///
/// Received bytes accumulate until they equal the current exchange's
/// `expect` text exactly; then the buffer is cleared, the reply (if any) is
/// sent and the next exchange becomes current.
#[derive(Debug, Clone, Default)]
pub struct Script {
    exchanges: Vec<Exchange>,
    current: usize,
    buffer: Vec<u8>,
    transcript: Vec<u8>,
}

impl Script {
    pub fn new(exchanges: Vec<Exchange>) -> Self {
        Self {
            exchanges,
            ..Self::default()
        }
    }

    pub fn is_done(&self) -> bool {
        self.current >= self.exchanges.len()
    }

    /// Every byte fed so far.
    pub fn transcript(&self) -> &[u8] {
        &self.transcript
    }

    /// Bytes received since the last matched exchange.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    pub fn feed(&mut self, byte: u8) -> ScriptAction {
        self.transcript.push(byte);
        let Some(exchange) = self.exchanges.get(self.current) else {
            return ScriptAction::Done;
        };

        self.buffer.push(byte);
        if self.buffer != exchange.expect {
            if !exchange.expect.starts_with(&self.buffer) {
                log::trace!(
                    "script step {} diverged: {:?}",
                    self.current,
                    String::from_utf8_lossy(&self.buffer)
                );
            }
            return ScriptAction::Continue;
        }

        log::debug!(
            "script step {} matched {:?}",
            self.current,
            String::from_utf8_lossy(&exchange.expect)
        );
        self.buffer.clear();
        self.current += 1;
        match (&exchange.reply, self.current >= self.exchanges.len()) {
            (Some(reply), _) => ScriptAction::Send(reply.clone()),
            (None, true) => ScriptAction::Done,
            (None, false) => ScriptAction::Continue,
        }
    }
}
