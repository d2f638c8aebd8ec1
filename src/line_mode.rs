//! 行模式前端：逐行读取输入，输出每条命令新追加的记录

use std::io::{self, BufRead, Write};

use tokio::runtime::Handle;

use crate::kernel::{CommandInterpreter, TerminalSession};

pub struct LineMode<'a> {
    handle: Handle,
    interpreter: &'a CommandInterpreter,
    session: TerminalSession,
    /// 交互式终端上用户已经看到自己输入的内容，不再回显 `$ <line>`
    interactive: bool,
}

impl<'a> LineMode<'a> {
    pub fn new(
        handle: Handle,
        interpreter: &'a CommandInterpreter,
        session: TerminalSession,
        interactive: bool,
    ) -> Self {
        Self {
            handle,
            interpreter,
            session,
            interactive,
        }
    }

    pub fn session(&self) -> &TerminalSession {
        &self.session
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        for line in self.session.transcript().lines() {
            writeln!(output, "{line}")?;
        }

        let mut lines = input.lines();
        loop {
            if self.interactive {
                write!(output, "{}", self.session.prompt())?;
                output.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            let start = self.session.transcript().len();
            let interpreter = self.interpreter;
            let session = &mut self.session;
            self.handle
                .block_on(async { session.run_line(interpreter, &line).await });

            let skip = usize::from(self.interactive);
            for written in self.session.transcript().since(start).iter().skip(skip) {
                writeln!(output, "{written}")?;
            }
        }
        output.flush()
    }
}
