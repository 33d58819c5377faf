use std::path::Path;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::analysis_fetch;
use crate::config::{AnalysisSource, AppConfig};
use crate::fake_analysis;
use crate::normalize::AnalysisPayload;
use crate::state::{Delta, ProviderCommand};

const DEMO_LATENCY: Duration = Duration::from_millis(600);

/// Worker owning all network I/O. Runs until the command sender is dropped.
pub fn spawn_analysis_provider(
    cfg: AppConfig,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut rng = rand::thread_rng();
        for cmd in cmd_rx {
            match cmd {
                ProviderCommand::Analyze {
                    video,
                    save_annotated,
                } => {
                    let _ = tx.send(Delta::AnalysisStarted {
                        video: video.display().to_string(),
                    });
                    let result = match cfg.source {
                        AnalysisSource::Service => {
                            analysis_fetch::analyze_video(&cfg, &video, save_annotated)
                        }
                        AnalysisSource::Demo => {
                            thread::sleep(DEMO_LATENCY);
                            demo_analysis(&mut rng, &video)
                        }
                    };
                    let delta = match result {
                        Ok(payload) => Delta::AnalysisReady(Box::new(payload)),
                        Err(err) => Delta::AnalysisFailed(format!("{err:#}")),
                    };
                    if tx.send(delta).is_err() {
                        return;
                    }
                }
                ProviderCommand::CheckHealth => {
                    let delta = match cfg.source {
                        AnalysisSource::Demo => Delta::Health("demo source".to_string()),
                        AnalysisSource::Service => match analysis_fetch::check_health(&cfg) {
                            Ok(status) => Delta::Health(status),
                            Err(err) => Delta::Log(format!("[WARN] Health check failed: {err:#}")),
                        },
                    };
                    if tx.send(delta).is_err() {
                        return;
                    }
                }
            }
        }
    })
}

fn demo_analysis<R: rand::Rng>(rng: &mut R, video: &Path) -> Result<AnalysisPayload> {
    let name = video
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("demo");
    Ok(fake_analysis::synthetic_payload(rng, name))
}
