//! Contact-form submission.

use anyhow::Result;
use colored::Colorize;

use folio_client::FolioClient;
use folio_core::model::ContactDraft;
use folio_core::FolioError;

pub async fn send(
    client: &FolioClient,
    name: String,
    email: String,
    subject: Option<String>,
    message: String,
) -> Result<()> {
    let draft = ContactDraft {
        name,
        email,
        subject,
        message,
    };

    match client.api().submit_contact(&draft).await {
        Ok(ack) => {
            println!("{}", format!("✓ {}", ack).green());
            Ok(())
        }
        Err(err) if err.is_validation() => {
            print_validation(&err);
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

/// Prints one line per rejected field, mirroring the inline form errors.
fn print_validation(err: &FolioError) {
    match err {
        FolioError::Multiple(errors) => {
            for inner in errors {
                print_validation(inner);
            }
        }
        FolioError::Validation { message, .. } => {
            eprintln!("{}", message.red());
        }
        other => {
            eprintln!("{}", other.to_string().red());
        }
    }
}
