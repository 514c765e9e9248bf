use std::path::PathBuf;

use bytes::{Bytes, BytesMut};
use futures::{stream::BoxStream, StreamExt};

use crate::{
    api::ApiClient,
    application::delivery::{deliver, SaveTarget},
    domain::{AppError, DownloadRequest, TransportFailure},
};

#[derive(Debug, Clone)]
pub enum DownloadEvent {
    Progress(f32),
    Finished(Result<Bytes, TransportFailure>),
}

#[derive(Clone)]
pub struct DownloadCoordinator {
    api_client: ApiClient,
    save_target: SaveTarget,
}

impl DownloadCoordinator {
    pub fn new(api_client: ApiClient, save_target: SaveTarget) -> Self {
        Self {
            api_client,
            save_target,
        }
    }

    /// Issues one request and buffers the body, reporting progress along the way.
    /// The stream always ends with exactly one `Finished`.
    pub fn fetch_stream(&self, request: DownloadRequest) -> BoxStream<'static, DownloadEvent> {
        futures::stream::unfold(
            FetchState::Start {
                client: self.api_client.clone(),
                request,
            },
            |state| async move {
                match state {
                    FetchState::Start { client, request } => {
                        tracing::info!(
                            link = %request.link,
                            format = request.format.wire_value(),
                            quality = %request.quality,
                            "request issued"
                        );
                        match client.open_stream(&request).await {
                            Ok((total_size, stream)) => Some((
                                DownloadEvent::Progress(0.0),
                                FetchState::Receiving {
                                    stream: stream.boxed(),
                                    buffer: BytesMut::new(),
                                    total: total_size,
                                },
                            )),
                            Err(e) => {
                                tracing::warn!(error = %e, "request failed");
                                Some((
                                    DownloadEvent::Finished(Err(e.into())),
                                    FetchState::Finished,
                                ))
                            }
                        }
                    }
                    FetchState::Receiving {
                        mut stream,
                        mut buffer,
                        total,
                    } => match stream.next().await {
                        Some(Ok(chunk)) => {
                            buffer.extend_from_slice(&chunk);

                            let progress = match total {
                                Some(total_size) if total_size > 0 => {
                                    buffer.len() as f32 / total_size as f32
                                }
                                _ => 0.0,
                            };

                            Some((
                                DownloadEvent::Progress(progress),
                                FetchState::Receiving {
                                    stream,
                                    buffer,
                                    total,
                                },
                            ))
                        }
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, received = buffer.len(), "body interrupted");
                            Some((
                                DownloadEvent::Finished(Err(TransportFailure::Network(
                                    e.to_string(),
                                ))),
                                FetchState::Finished,
                            ))
                        }
                        None => {
                            tracing::info!(bytes = buffer.len(), "response received");
                            Some((
                                DownloadEvent::Finished(Ok(buffer.freeze())),
                                FetchState::Finished,
                            ))
                        }
                    },
                    FetchState::Finished => None,
                }
            },
        )
        .boxed()
    }

    pub async fn save(&self, payload: Bytes, file_name: String) -> Result<Option<PathBuf>, AppError> {
        deliver(payload, file_name, self.save_target.clone()).await
    }
}

enum FetchState {
    Start {
        client: ApiClient,
        request: DownloadRequest,
    },
    Receiving {
        stream: BoxStream<'static, crate::api::Result<Bytes>>,
        buffer: BytesMut,
        total: Option<u64>,
    },
    Finished,
}
