//! Scene only: skybox, platform and lights, no hands

use hands_app::{run, DemoArgs};
use vr_hands::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run("scene demo", AppFeatures::empty(), HandScript::default, DemoArgs::from_env())?;
    Ok(())
}
