//! Pull tokenizer turning an XMLTV document into guide events.
//!
//! Built on quick-xml's streaming reader. The document is read forward once
//! and never buffered as a whole. Text is decoded with the encoding named in
//! the XML declaration (UTF-8 when there is none).

mod time;

pub use time::parse_timestamp;

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::{Decoder, Reader};
use thiserror::Error;

/// Element that opens and closes one program.
pub const PROGRAMME: &str = "programme";

#[derive(Error, Debug)]
pub enum XmltvError {
    #[error("XML parsing error at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

}

/// One tokenizer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuideEvent {
    /// `<programme>` with its raw attributes.
    ProgramStart {
        channel: String,
        start: String,
        stop: Option<String>,
        /// `clumpidx`, set when the broadcast is split into fragments.
        fragment: Option<String>,
    },
    ElementStart {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
    /// `ElementEnd("programme")` completes a program.
    ElementEnd { name: String },
}

impl GuideEvent {
    pub fn element_end(name: impl Into<String>) -> Self {
        Self::ElementEnd { name: name.into() }
    }
}

/// Look up an attribute value by name.
pub fn attribute<'a>(attributes: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Iterator of guide events over a buffered XMLTV source.
pub struct XmltvEvents<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    /// End event owed for a self-closing element.
    pending_end: Option<String>,
    done: bool,
}

impl<R: BufRead> XmltvEvents<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            buf: Vec::new(),
            pending_end: None,
            done: false,
        }
    }

    fn next_event(&mut self) -> Result<Option<GuideEvent>, XmltvError> {
        loop {
            self.buf.clear();
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|source| XmltvError::Xml {
                    position: self.reader.buffer_position() as u64,
                    source,
                })?;
            let position = self.reader.buffer_position() as u64;
            let decoder = self.reader.decoder();

            match event {
                Event::Start(e) => return start_event(&e, decoder, position).map(Some),
                Event::Empty(e) => {
                    let event = start_event(&e, decoder, position)?;
                    self.pending_end = Some(decode(decoder, e.name().as_ref(), position)?);
                    return Ok(Some(event));
                }
                Event::End(e) => {
                    let name = decode(decoder, e.name().as_ref(), position)?;
                    return Ok(Some(GuideEvent::ElementEnd { name }));
                }
                Event::Text(e) => {
                    let text = e
                        .unescape()
                        .map_err(|source| XmltvError::Xml { position, source })?;
                    let text = text.trim();
                    if !text.is_empty() {
                        return Ok(Some(GuideEvent::Text(text.to_string())));
                    }
                }
                Event::CData(e) => {
                    let text = decode(decoder, &e, position)?;
                    let text = text.trim();
                    if !text.is_empty() {
                        return Ok(Some(GuideEvent::Text(text.to_string())));
                    }
                }
                Event::Eof => return Ok(None),
                // declarations, comments, doctype, processing instructions
                _ => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for XmltvEvents<R> {
    type Item = Result<GuideEvent, XmltvError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(name) = self.pending_end.take() {
            return Some(Ok(GuideEvent::ElementEnd { name }));
        }
        if self.done {
            return None;
        }
        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn decode(decoder: Decoder, bytes: &[u8], position: u64) -> Result<String, XmltvError> {
    decoder
        .decode(bytes)
        .map(|text| text.into_owned())
        .map_err(|source| XmltvError::Xml { position, source })
}

/// `position` is where the element ends in the input, for error messages.
fn start_event(e: &BytesStart, decoder: Decoder, position: u64) -> Result<GuideEvent, XmltvError> {
    let name = decode(decoder, e.name().as_ref(), position)?;
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|source| XmltvError::Xml {
            position,
            source: source.into(),
        })?;
        let key = decode(decoder, attr.key.as_ref(), position)?;
        let value = attr
            .decode_and_unescape_value(decoder)
            .map_err(|source| XmltvError::Xml { position, source })?
            .into_owned();
        attributes.push((key, value));
    }

    if name == PROGRAMME {
        return Ok(GuideEvent::ProgramStart {
            channel: attribute(&attributes, "channel")
                .unwrap_or_default()
                .to_string(),
            start: attribute(&attributes, "start")
                .unwrap_or_default()
                .to_string(),
            stop: attribute(&attributes, "stop").map(String::from),
            fragment: attribute(&attributes, "clumpidx").map(String::from),
        });
    }

    Ok(GuideEvent::ElementStart { name, attributes })
}
