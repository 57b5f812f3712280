mod cli;
mod render;

use hr_attrition::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
