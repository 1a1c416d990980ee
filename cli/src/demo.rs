//! The demonstration sequence: one call of every operation.
//!
//! Each step logs its outcome and the sequence carries on after a failure, so
//! one rejected request does not hide the behavior of the others.

use avatar_core::{
    ApiError, AssetSink, AvatarRequestParams, AvatarResult, AvatarService, Gender, ImageFormat, Presenter,
    Transport,
};
use tracing::{error, info, warn};

use crate::page::DISPLAY_SURFACE;

/// Tally of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl DemoSummary {
    fn record(&mut self, step: &str, ok: bool) {
        if ok {
            self.succeeded += 1;
        } else {
            warn!(step, "step did not succeed");
            self.failed += 1;
        }
    }
}

pub struct Demo<T, S, P> {
    service: AvatarService<T, S>,
    presenter: P,
    check_health: bool,
}

impl<T: Transport, S: AssetSink, P: Presenter> Demo<T, S, P> {
    pub fn new(service: AvatarService<T, S>, presenter: P) -> Self {
        Self {
            service,
            presenter,
            check_health: true,
        }
    }

    pub fn check_health(mut self, enabled: bool) -> Self {
        self.check_health = enabled;
        self
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    pub fn run(&mut self) -> DemoSummary {
        let mut summary = DemoSummary::default();

        if self.check_health {
            let ok = settle("health", self.service.health().map(|result| result.is_success()));
            summary.record("health", ok);
        }

        let ok = self.generate_and_present(AvatarRequestParams {
            size: 300,
            gender: Gender::Male,
            ..Default::default()
        });
        summary.record("generate", ok);

        let ok = settle(
            "save svg",
            self.service
                .save_single(&AvatarRequestParams {
                    size: 280,
                    gender: Gender::Female,
                    format: ImageFormat::Svg,
                    filename: Some("female_avatar".to_string()),
                    ..Default::default()
                })
                .map(|outcome| outcome.is_saved()),
        );
        summary.record("save svg", ok);

        let ok = settle(
            "save png",
            self.service
                .save_single(&AvatarRequestParams {
                    size: 400,
                    gender: Gender::Random,
                    format: ImageFormat::Png,
                    filename: Some("random_avatar".to_string()),
                    ..Default::default()
                })
                .map(|outcome| outcome.is_saved()),
        );
        summary.record("save png", ok);

        let ok = settle(
            "batch svg",
            self.service
                .save_batch(&AvatarRequestParams {
                    amount: 3,
                    size: 200,
                    gender: Gender::Male,
                    format: ImageFormat::Svg,
                    ..Default::default()
                })
                .map(|outcome| outcome.is_saved()),
        );
        summary.record("batch svg", ok);

        let ok = settle(
            "batch png",
            self.service
                .save_batch(&AvatarRequestParams {
                    amount: 2,
                    size: 300,
                    gender: Gender::Female,
                    format: ImageFormat::Png,
                    ..Default::default()
                })
                .map(|outcome| outcome.is_saved()),
        );
        summary.record("batch png", ok);

        let ok = settle(
            "metadata",
            self.service
                .fetch_metadata(&AvatarRequestParams {
                    size: 250,
                    gender: Gender::Random,
                    ..Default::default()
                })
                .map(|result| result.is_success()),
        );
        summary.record("metadata", ok);

        info!(succeeded = summary.succeeded, failed = summary.failed, "demonstration finished");
        summary
    }

    fn generate_and_present(&mut self, params: AvatarRequestParams) -> bool {
        let avatar = match self.service.generate(&params) {
            Ok(AvatarResult::Success(avatar)) => avatar,
            Ok(AvatarResult::Failure { .. }) => return false,
            Err(e) => {
                error!(step = "generate", error = %e, "step aborted");
                return false;
            }
        };
        info!(size = avatar.size, gender = %avatar.gender, svg_len = avatar.svg.len(), "generated");
        if let Err(e) = self.presenter.present(&avatar.svg, DISPLAY_SURFACE) {
            error!(error = %e, "could not display avatar");
        }
        true
    }
}

/// Logs a fault and turns it into a failed step.
fn settle(step: &str, result: Result<bool, ApiError>) -> bool {
    result.unwrap_or_else(|e| {
        error!(step, error = %e, "step aborted");
        false
    })
}
