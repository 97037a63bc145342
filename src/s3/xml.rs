//! S3 `<Error>` document rendering

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Failed to render XML: {0}")]
pub struct XmlRenderError(String);

/// Render an S3 error document
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <Error>
///   <Code>MethodNotAllowed</Code>
///   <Message>The specified method is not allowed against this resource.</Message>
///   <Resource>/my-bucket/key.txt</Resource>
///   <RequestId>6f2c...</RequestId>
/// </Error>
/// ```
pub fn render_error(
    code: &str,
    message: &str,
    resource: &str,
    request_id: &str,
) -> Result<String, XmlRenderError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write(&mut writer, Event::Start(BytesStart::new("Error")))?;
    for (name, text) in [
        ("Code", code),
        ("Message", message),
        ("Resource", resource),
        ("RequestId", request_id),
    ] {
        write(&mut writer, Event::Start(BytesStart::new(name)))?;
        write(&mut writer, Event::Text(BytesText::new(text)))?;
        write(&mut writer, Event::End(BytesEnd::new(name)))?;
    }
    write(&mut writer, Event::End(BytesEnd::new("Error")))?;

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| XmlRenderError(e.to_string()))
}

fn write(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<(), XmlRenderError> {
    writer
        .write_event(event)
        .map_err(|e| XmlRenderError(e.to_string()))
}
