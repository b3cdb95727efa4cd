use std::io::Cursor;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;
use tracing::debug;

use super::MetadataDocument;

#[derive(Debug, Error)]
pub enum NfoError {
    #[error("Failed to build nfo XML: {0}")]
    Xml(String),

    #[error("Failed to write nfo file: {0}")]
    Io(#[from] std::io::Error),
}

/// Render a document as a Kodi movie `.nfo`.
///
/// Element order is fixed: title, plot, studio, premiered, uniqueid, genre,
/// tag, then one `actor` per cast member.
pub fn render_nfo(doc: &MetadataDocument) -> Result<String, NfoError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), Some("yes"))),
    )?;
    write(&mut writer, Event::Start(BytesStart::new("movie")))?;

    text_element(&mut writer, BytesStart::new("title"), &doc.title)?;
    if let Some(plot) = &doc.plot {
        text_element(&mut writer, BytesStart::new("plot"), plot)?;
    }
    text_element(&mut writer, BytesStart::new("studio"), &doc.studio)?;
    if let Some(premiered) = &doc.premiered {
        text_element(&mut writer, BytesStart::new("premiered"), premiered)?;
    }
    text_element(
        &mut writer,
        BytesStart::new("uniqueid").with_attributes([
            ("type", doc.unique_id.kind.as_str()),
            ("default", "true"),
        ]),
        &doc.unique_id.value,
    )?;
    text_element(&mut writer, BytesStart::new("genre"), doc.genre())?;
    text_element(&mut writer, BytesStart::new("tag"), doc.tag())?;

    for name in &doc.cast {
        write(&mut writer, Event::Start(BytesStart::new("actor")))?;
        text_element(&mut writer, BytesStart::new("name"), name)?;
        write(&mut writer, Event::End(BytesEnd::new("actor")))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("movie")))?;

    let mut xml = String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| NfoError::Xml(e.to_string()))?;
    xml.push('\n');
    Ok(xml)
}

/// Render and write the `.nfo` file.
pub async fn write_nfo(path: &Path, doc: &MetadataDocument) -> Result<(), NfoError> {
    let xml = render_nfo(doc)?;
    debug!(path = %path.display(), bytes = xml.len(), "Writing nfo");
    tokio::fs::write(path, xml).await?;
    Ok(())
}

fn write(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<(), NfoError> {
    writer
        .write_event(event)
        .map_err(|e| NfoError::Xml(e.to_string()))
}

/// `<name>text</name>`, or `<name/>` when the text is empty.
fn text_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    start: BytesStart<'_>,
    text: &str,
) -> Result<(), NfoError> {
    if text.is_empty() {
        return write(writer, Event::Empty(start));
    }

    let end = start.to_end().into_owned();
    write(writer, Event::Start(start))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(end))
}
