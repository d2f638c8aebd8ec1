use super::message::AppMessage;
use crate::kernel::interpreter::CommandInterpreter;
use crate::kernel::terminal::{SessionId, Submission};
use std::future::Future;
use std::io;
use std::sync::mpsc::Sender;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime, tx })
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// 在后台求值，结果通过消息通道送回 UI 线程
    pub fn evaluate(
        &self,
        interpreter: &CommandInterpreter,
        session: SessionId,
        submission: Submission,
    ) {
        let tx = self.tx.clone();
        let interpreter = interpreter.clone();
        self.runtime.spawn(async move {
            let evaluation = interpreter
                .evaluate(&submission.line, &submission.cwd)
                .await;
            if tx
                .send(AppMessage::Evaluated {
                    session,
                    ticket: submission.ticket,
                    evaluation,
                })
                .is_err()
            {
                tracing::debug!(ticket = submission.ticket, "ui channel closed, dropping result");
            }
        });
    }
}
