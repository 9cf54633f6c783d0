//! DS3 XML serialization: building request bodies.
//!
//! The bulk job request is the only XML the client sends:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <MasterObjectList>
//!   <Objects>
//!     <Object Name="photos/1.jpg" Size="2048"/>
//!   </Objects>
//! </MasterObjectList>
//! ```
//!
//! Chunk numbers and server ids are response-only and are never written.

use std::io::{self, Write};

use ds3_model::{BulkObject, BulkObjectList};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, Event};

use crate::error::XmlError;

/// Root element of a bulk job document.
pub const MASTER_OBJECT_LIST: &str = "MasterObjectList";

/// Trait for serializing DS3 types to XML.
///
/// Implementors write their content as child elements inside the current XML
/// context. The root element is handled by [`to_xml`].
pub trait Ds3Serialize {
    /// Serialize this value as XML child elements into the given writer.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if writing to the underlying writer fails.
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()>;
}

/// Serialize a value as a complete XML document under `root_element`.
pub fn to_xml<T: Ds3Serialize>(root_element: &str, value: &T) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(256);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element(root_element)
        .write_inner_content(|w| value.serialize_xml(w))?;

    Ok(buf)
}

/// Encode the body of a bulk get/put job request.
pub fn bulk_request_xml(objects: &BulkObjectList) -> Result<Vec<u8>, XmlError> {
    to_xml(MASTER_OBJECT_LIST, objects)
}

impl Ds3Serialize for BulkObject {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let size = self.size.to_string();
        writer
            .create_element("Object")
            .with_attribute(("Name", self.name.as_str()))
            .with_attribute(("Size", size.as_str()))
            .write_empty()?;
        Ok(())
    }
}

impl Ds3Serialize for BulkObjectList {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.create_element("Objects").write_inner_content(|w| {
            for object in &self.objects {
                object.serialize_xml(w)?;
            }
            Ok(())
        })?;
        Ok(())
    }
}
