use clap::{CommandFactory, Parser};
use env_logger::Env;
use smartlib_audit::cli::{Args, Mode};
use smartlib_audit::{ui, ProjectAuditor, ReportWriter, SafeRefactorer};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level()))
        .format_timestamp_millis()
        .init();

    let Some(mode) = args.mode() else {
        Args::command().print_help()?;
        println!();
        return Ok(());
    };

    log::info!("Running {} (reports in {:?})", mode, args.out);

    let writer = ReportWriter::new(&args.out);
    let auditor = ProjectAuditor::new()?.quiet(args.quiet);

    match mode {
        Mode::Audit(root) => {
            let report = auditor.audit(&root)?;
            writer.write_audit(&report)?;
            if !args.quiet {
                ui::print_audit_summary(&report, writer.out_dir());
            }
        }
        Mode::Refactor(root) => {
            let report = auditor.audit(&root)?;
            writer.write_audit(&report)?;
            if !args.quiet {
                ui::print_audit_summary(&report, writer.out_dir());
            }

            let refactor = SafeRefactorer::new(&root)?.quiet(args.quiet).run()?;
            writer.write_refactor(&refactor)?;
            if !args.quiet {
                ui::print_refactor_summary(&refactor);
            }
        }
    }

    Ok(())
}
