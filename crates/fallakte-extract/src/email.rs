//! E-mail (.eml/.msg) extraction

use fallakte_domain::{ExtractedText, ExtractionError, FormatMetadata};
use mail_parser::{MessageParser, MimeHeaders};

/// Extract headers and plain-text body from an RFC 822 message.
///
/// The output prepends a German header block to the body so the analysis
/// prompt sees sender, recipients, and subject alongside the content.
pub fn extract(content: &[u8]) -> Result<ExtractedText, ExtractionError> {
    let message = MessageParser::default()
        .parse(content)
        .ok_or_else(|| ExtractionError::Malformed("E-Mail konnte nicht geparst werden".to_string()))?;

    let from = message
        .from()
        .and_then(|addrs| {
            addrs.first().map(|addr| match addr.name() {
                Some(name) => format!("{} <{}>", name, addr.address().unwrap_or_default()),
                None => addr.address().unwrap_or_default().to_string(),
            })
        })
        .unwrap_or_default();

    let to = join_addresses(message.to());
    let cc = join_addresses(message.cc());
    let subject = message.subject().unwrap_or_default().to_string();
    let date = message.date().map(|d| d.to_rfc3339()).unwrap_or_default();

    let attachments: Vec<String> = message
        .attachments()
        .filter_map(|part| part.attachment_name().map(|name| name.to_string()))
        .collect();

    let body = message
        .body_text(0)
        .map(|body| body.into_owned())
        .unwrap_or_default();

    let attachment_line = if attachments.is_empty() {
        "Keine".to_string()
    } else {
        attachments.join(", ")
    };

    let text = format!(
        "Von: {}\nAn: {}\nCC: {}\nBetreff: {}\nDatum: {}\nAnhänge: {}\n{}\n\n{}",
        from,
        to,
        cc,
        subject,
        date,
        attachment_line,
        "=".repeat(50),
        body
    );

    Ok(ExtractedText::new(
        text,
        FormatMetadata::Email {
            from,
            to,
            cc,
            subject,
            date,
            attachments,
        },
    ))
}

fn join_addresses(addrs: Option<&mail_parser::Address<'_>>) -> String {
    addrs
        .map(|addrs| {
            addrs
                .iter()
                .map(|addr| addr.address().unwrap_or_default().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}
