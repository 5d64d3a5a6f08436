use std::process::ExitCode;

use stereo_view::{
    SceneConfig,
    logging::{LoggingConfig, init_logging},
};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match stereo_view::run(SceneConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}
