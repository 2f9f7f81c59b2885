use std::process::ExitCode;

fn main() -> ExitCode {
    let Err(e) = hubspot_workflows_cli::run(std::env::args()) else {
        return ExitCode::SUCCESS;
    };
    let code = hubspot_workflows_cli::error::report(
        &e,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    );
    ExitCode::from(code)
}
