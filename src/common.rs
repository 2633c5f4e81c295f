use std::process::ExitStatus;

use launcher_core::error::LauncherError;
use launcher_core::status::forwarded_code;

pub enum Error {
    Launcher(LauncherError),
    Server(i32),
}

pub trait IntoResult<T> {
    fn into_result(self) -> Result<T, Error>;
}

impl IntoResult<()> for Result<ExitStatus, LauncherError> {
    fn into_result(self) -> Result<(), Error> {
        match self {
            Ok(status) => {
                if status.success() {
                    Ok(())
                } else {
                    Err(Error::Server(forwarded_code(status)))
                }
            }
            Err(err) => Err(Error::Launcher(err)),
        }
    }
}
