use std::process::ExitCode;

fn main() -> ExitCode {
    listwise_cli::run()
}
