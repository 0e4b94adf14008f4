use std::path::Path;

use clap::Parser;
use log::error;

use sms_alert_api::config::{self, TwilioConfig};
use sms_alert_api::twilio::{SendError, SmsSender, TwilioSender, UNVERIFIED_NUMBER_CODE};

/// Send a single SMS through the configured Twilio account.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Recipient phone number in E.164 format (e.g. +919360331390)
    #[arg(short, long)]
    to: String,

    /// Message body
    #[arg(short, long)]
    message: String,

    /// Path to the Twilio config file
    #[arg(short, long, default_value = config::CONFIG_FILE)]
    config: String,
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    // First run: materialize a template and let the operator fill it in.
    if !Path::new(&args.config).exists() {
        if let Err(err) = config::write_template(&args.config) {
            error!("Failed to create '{}': {}", args.config, err);
            std::process::exit(1);
        }
        println!(
            "Created '{}'. Fill in your Twilio credentials and run again.",
            args.config
        );
        return;
    }

    let config = match TwilioConfig::load(&args.config) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };

    let sender = TwilioSender::new(&config);
    match sender.send(&args.to, &args.message).await {
        Ok(sid) => println!("Message sent, SID {}", sid),
        Err(SendError::Rejected { code, message }) if code == UNVERIFIED_NUMBER_CODE => {
            error!("Twilio error {}: {}", code, message);
            error!(
                "Trial accounts can only send to verified numbers; verify {} in the Twilio console.",
                args.to
            );
            std::process::exit(1);
        }
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    }
}
