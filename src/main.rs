use clap::Parser;
use miette::Result;
use cogs::cli::Cli;
use cogs::core::logging;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) so piping the
    // report into `head` and friends doesn't panic on a broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(false)
                .unicode(true)
                .context_lines(2)
                .wrap_lines(false)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    logging::init(cli.log_level);

    cogs::cli::run(cli)?;
    Ok(())
}
