//! Scene plus tracked hands: a fist cycles the hand model, a peace sign toggles the glove color

use hands_app::{hands_script, run, DemoArgs};
use vr_hands::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run("hands demo", AppFeatures::HANDS, hands_script, DemoArgs::from_env())?;
    Ok(())
}
