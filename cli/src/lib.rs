//! Reference host for the mshade micro-shader language.
//!
//! Loads a script, compiles it, and drives it through two hard-coded
//! demonstration calls - `calcCircleArea` and `calcSectorArea` - printing
//! each function's variables before and after the call. This mirrors the
//! kind of call site a real embedding makes: the variable vector is
//! always allocated at full capacity and handed to [`mshade::call`]
//! by reference, with only the parameter slots the caller cares about
//! pre-filled.

use std::fmt;
use std::fs;
use std::path::Path;

use mshade::constants::MAX_VARS;
use mshade::{CallError, LoadError, RuntimeImage};

#[derive(Debug)]
pub enum Error {
    Load(LoadError),
    Call(CallError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Load(e) => write!(f, "{}", e),
            Error::Call(e) => write!(f, "{}", e),
        }
    }
}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Error {
        Error::Load(err)
    }
}

impl From<CallError> for Error {
    fn from(err: CallError) -> Error {
        Error::Call(err)
    }
}

#[tracing::instrument]
pub fn load_script<P: AsRef<Path> + fmt::Debug>(path: P) -> Result<RuntimeImage, Error> {
    let source = fs::read_to_string(&path).map_err(|err| {
        tracing::warn!(%err, "could not read script");
        Error::Load(LoadError::FileUnreadable)
    })?;
    Ok(mshadec::compile(&source)?)
}

pub fn run_demo(image: &RuntimeImage) -> Result<(), Error> {
    demo_circle_area(image)?;
    demo_sector_area(image)?;
    Ok(())
}

fn demo_circle_area(image: &RuntimeImage) -> Result<(), Error> {
    let mut vars = [0.0f32; MAX_VARS];
    vars[0] = f32::NAN;
    vars[1] = 2.0;

    println!("calcCircleArea()");
    println!(" before: area={:.2} radius={:.2}", vars[0], vars[1]);
    mshade::call(image, "calcCircleArea", &mut vars)?;
    println!(" after: area={:.2} radius={:.2}", vars[0], vars[1]);
    Ok(())
}

fn demo_sector_area(image: &RuntimeImage) -> Result<(), Error> {
    let mut vars = [0.0f32; MAX_VARS];
    vars[0] = f32::NAN;
    vars[1] = 2.0;
    vars[2] = std::f32::consts::PI;

    println!("calcSectorArea()");
    println!(
        " before: area={:.2} radius={:.2} angle={:.2}",
        vars[0], vars[1], vars[2]
    );
    mshade::call(image, "calcSectorArea", &mut vars)?;
    println!(
        " after: area={:.2} radius={:.2} angle={:.2}",
        vars[0], vars[1], vars[2]
    );
    Ok(())
}
