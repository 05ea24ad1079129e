//! Command execution: option capture, the workflow run and error reporting.

mod run;

use crate::cli::{Args, RuntimeConfig};
use crate::error::{FlowError, Result};

use run::execute_run;

/// Execute the run described by `args`, returning the process exit code
pub fn execute_command(args: Args) -> Result<i32> {
    let config = RuntimeConfig::from(&args);

    let options = match args.to_run_options() {
        Ok(options) => options,
        Err(e) => {
            report_failure(&config, &FlowError::from(e));
            return Ok(1);
        }
    };

    match execute_run(&options, &config) {
        Ok(()) => {
            if options.pretend {
                config.success_println("Pretend run complete; nothing was executed");
            } else {
                config.success_println("All planned commands completed successfully");
            }
            Ok(0)
        }
        Err(e) => {
            report_failure(&config, &e);
            Ok(1)
        }
    }
}

fn report_failure(config: &RuntimeConfig, error: &FlowError) {
    config.error_println(&format!("Run failed: {}", error));
    if error.is_config_error() && !error.ran_commands() {
        config.println("No commands were executed.");
    }

    let suggestions = error.recovery_suggestions();
    if !suggestions.is_empty() {
        config.println("\n💡 Recovery suggestions:");
        for suggestion in suggestions {
            config.indent(&format!("• {}", suggestion));
        }
    }
}
