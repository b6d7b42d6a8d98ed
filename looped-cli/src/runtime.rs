//! Runs [`Command`]s on the tokio runtime and reports results as [`Event`]s.
//!
//! Tasks never touch application state; the UI loop drains the channel and
//! applies each event between frames.

use std::time::Duration;

use log::{info, warn};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use looped_core::upload::PROGRESS_FRAMES;
use looped_core::{Command, Event, RequestToken};

use crate::api::ApiClient;
use crate::io;

pub struct Executor {
    handle: Handle,
    api: ApiClient,
    tx: UnboundedSender<Event>,
    progress_interval: Duration,
}

impl Executor {
    pub fn new(handle: Handle, api: ApiClient, tx: UnboundedSender<Event>, progress_interval: Duration) -> Self {
        Self {
            handle,
            api,
            tx,
            progress_interval,
        }
    }

    pub fn execute(&self, command: Command) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        match command {
            Command::LoadFeed { token } => {
                self.handle.spawn(async move {
                    let result = api.fetch_feed(None).await;
                    let _ = tx.send(Event::FeedLoaded { token, result });
                });
            }
            Command::LoadExplore { token } => {
                self.handle.spawn(async move {
                    let result = api.fetch_feed(None).await;
                    let _ = tx.send(Event::ExploreLoaded { token, result });
                });
            }
            Command::FetchQuiz { token, video_id } => {
                self.handle.spawn(async move {
                    let result = api.fetch_quiz(&video_id).await;
                    let _ = tx.send(Event::QuizLoaded {
                        token,
                        video_id,
                        result,
                    });
                });
            }
            Command::Upload { token, path } => {
                let interval = self.progress_interval;
                let timeline = self.handle.clone();
                self.handle.spawn(async move {
                    let file = match io::read_upload(&path).await {
                        Ok(file) => file,
                        Err(e) => {
                            warn!("Upload aborted: {e:#}");
                            let _ = tx.send(Event::UploadAborted {
                                token,
                                reason: format!("{e:#}"),
                            });
                            return;
                        }
                    };
                    info!("Uploading {} ({} bytes)", file.file_name, file.bytes.len());
                    let _ = tx.send(Event::UploadSent { token });
                    timeline.spawn(run_timeline(token, interval, tx.clone()));

                    let result = api.upload_pdf(&file.file_name, file.bytes).await;
                    let _ = tx.send(Event::UploadFinished { token, result });
                });
            }
        }
    }
}

/// Emit one progress frame per `interval`, then the completion marker
async fn run_timeline(token: RequestToken, interval: Duration, tx: UnboundedSender<Event>) {
    for frame in 0..PROGRESS_FRAMES.len() {
        if tx.send(Event::UploadProgress { token, frame }).is_err() {
            return;
        }
        tokio::time::sleep(interval).await;
    }
    let _ = tx.send(Event::UploadTimelineDone { token });
}

#[cfg(test)]
mod tests {
    use super::*;
    use looped_core::{App, AnswerPolicy, UploadPhase};
    use tokio::sync::mpsc;

    use crate::config::Config;

    #[tokio::test]
    async fn test_timeline_emits_every_frame_then_done() {
        let mut app = App::new(AnswerPolicy::LockFirst);
        let Command::Upload { token, .. } = app.upload_file("notes.pdf") else {
            panic!("expected an upload");
        };
        app.apply(Event::UploadSent { token });

        let (tx, mut rx) = mpsc::unbounded_channel();
        run_timeline(token, Duration::from_millis(1), tx).await;

        let mut frames = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let Event::UploadProgress { frame, .. } = event {
                frames.push(frame);
            }
            app.apply(event);
        }
        assert_eq!(frames, vec![0, 1, 2, 3, 4]);
        assert_eq!(app.upload.progress_message, PROGRESS_FRAMES[4]);
        assert_eq!(app.upload.phase, UploadPhase::Processing);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_unreadable_upload_reports_abort() {
        let api = ApiClient::new(&Config::default()).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let executor = Executor::new(Handle::current(), api, tx, Duration::from_millis(1));

        let mut app = App::new(AnswerPolicy::LockFirst);
        let command = app.upload_file("/no/such/dir/slides.pptx");
        executor.execute(command);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::UploadAborted { .. }));
        app.apply(event);
        assert_eq!(app.upload.phase, UploadPhase::Error);
    }
}
