use clap::Parser;
use pharmacheck::config::file::FileConfig;
use pharmacheck::domain::ports::{AuditSink, LookupService};
use pharmacheck::utils::{logger, validation::Validate};
use pharmacheck::{
    establish_session, CliConfig, HttpAuditSink, HttpLookup, MockLookup, Session, Verifier,
    VerifyEngine,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting pharmacheck CLI");

    if let Some(path) = config.config_file.clone() {
        let file = FileConfig::from_file(&path)?;
        config.apply_file(file);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // A failed sign-in is surfaced but does not block verification;
    // audit entries are simply left unscoped.
    let session = match establish_session(&config).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("❌ Sign-in failed: {}", e);
            eprintln!("❌ Sign-in failed: {}", e);
            Session::anonymous(config.app_id.clone())
        }
    };

    let audit = HttpAuditSink::new(config.log_endpoint.clone());
    if config.offline {
        tracing::info!("🔍 Verifying against the built-in stock table");
        let verifier = Verifier::new(MockLookup::new(), audit, session);
        run(VerifyEngine::new(verifier), &config.serials).await
    } else {
        let verifier = Verifier::new(
            HttpLookup::new(config.verify_endpoint.clone()),
            audit,
            session,
        );
        run(VerifyEngine::new(verifier), &config.serials).await
    }
}

async fn run<L, A>(engine: VerifyEngine<L, A>, serials: &[String]) -> anyhow::Result<()>
where
    L: LookupService,
    A: AuditSink + 'static,
{
    let mut failed = false;
    for raw in serials {
        match engine.run(raw).await {
            Ok((_, Some(verdict))) => {
                println!("{}", verdict.message);
                for line in &verdict.details {
                    println!("  {}", line);
                }
            }
            Ok((outcome, None)) => {
                tracing::info!("serial {} returned no displayable result", outcome.serial);
            }
            Err(e) => {
                failed = true;
                eprintln!("❌ {}", e);
            }
        }
    }

    // Give detached audit writes a moment to drain before exiting.
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    if failed {
        std::process::exit(2);
    }
    Ok(())
}
