//! SKOS RDF/XML reader using quick-xml's namespace-aware reader.
//!
//! A concept is any top-level `rdf:Description` or `skos:Concept` element
//! carrying `rdf:about`. Its direct children supply labels, the definition,
//! and `rdf:resource` references for broader/narrower/related. A reference
//! property may instead hold a nested node element; its `rdf:about` becomes
//! the reference and the nested node is read as a concept of its own.
//! Descriptions typed as a concept scheme or collection are skipped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::error::{IngestError, IngestResult};
use crate::ontology::{ConceptReader, ConceptRecord, DocumentFormat};

const RDF_NS: &[u8] = b"http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const SKOS_NS: &[u8] = b"http://www.w3.org/2004/02/skos/core#";

/// SKOS classes that describe structure rather than concepts.
const NON_CONCEPT_TYPES: [&str; 3] = ["ConceptScheme", "Collection", "OrderedCollection"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Concept,
    PrefLabel,
    AltLabel,
    Definition,
    Broader,
    Narrower,
    Related,
    Type,
    Other,
}

fn classify(ns: &ResolveResult, local: &[u8]) -> Element {
    match ns {
        ResolveResult::Bound(Namespace(uri)) if *uri == RDF_NS => match local {
            b"Description" => Element::Concept,
            b"type" => Element::Type,
            _ => Element::Other,
        },
        ResolveResult::Bound(Namespace(uri)) if *uri == SKOS_NS => match local {
            b"Concept" => Element::Concept,
            b"prefLabel" => Element::PrefLabel,
            b"altLabel" => Element::AltLabel,
            b"definition" => Element::Definition,
            b"broader" => Element::Broader,
            b"narrower" => Element::Narrower,
            b"related" => Element::Related,
            _ => Element::Other,
        },
        _ => Element::Other,
    }
}

fn parse_error(message: impl std::fmt::Display) -> IngestError {
    IngestError::Parse {
        format: DocumentFormat::Skos.to_string(),
        message: message.to_string(),
    }
}

/// Value of the first `rdf:<local>` attribute on an element.
fn rdf_attribute(
    reader: &NsReader<&[u8]>,
    element: &BytesStart<'_>,
    local: &[u8],
) -> IngestResult<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(parse_error)?;
        let (ns, name) = reader.resolve_attribute(attr.key);
        let is_rdf = matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == RDF_NS);
        if is_rdf && name.as_ref() == local {
            let value = attr.unescape_value().map_err(parse_error)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Concept under construction.
struct OpenConcept {
    record: ConceptRecord,
    /// Open elements inside the concept, the concept element itself included.
    depth: usize,
    /// Literal-valued child currently collecting text.
    field: Option<Element>,
    text: String,
    /// Reference property with no `rdf:resource`, waiting for a nested node.
    pending: Option<Element>,
    /// Declared inside another concept's property element.
    nested: bool,
    skip: bool,
}

impl OpenConcept {
    fn new(id: Option<String>, nested: bool) -> Self {
        Self {
            record: ConceptRecord {
                id,
                ..Default::default()
            },
            depth: 1,
            field: None,
            text: String::new(),
            pending: None,
            nested,
            skip: false,
        }
    }

    /// Handle a direct child that may carry an `rdf:resource` reference.
    fn reference(&mut self, kind: Element, resource: Option<String>) {
        let Some(resource) = resource else {
            if matches!(kind, Element::Broader | Element::Narrower | Element::Related) {
                self.pending = Some(kind);
            }
            return;
        };
        match kind {
            Element::Broader => self.record.broader.push(resource),
            Element::Narrower => self.record.narrower.push(resource),
            Element::Related => self.record.related.push(resource),
            Element::Type => {
                let local = resource.rsplit(['#', '/']).next().unwrap_or_default();
                if resource.as_bytes().starts_with(SKOS_NS) && NON_CONCEPT_TYPES.contains(&local)
                {
                    self.skip = true;
                }
            }
            _ => {}
        }
    }

    fn close_field(&mut self) {
        let text = std::mem::take(&mut self.text);
        match self.field.take() {
            Some(Element::PrefLabel) => self.record.pref_labels.push(text),
            Some(Element::AltLabel) => self.record.alt_labels.push(text),
            Some(Element::Definition) => self.record.definitions.push(text),
            _ => {}
        }
    }

    /// A nested node carrying nothing but `rdf:about` only names its target.
    fn is_bare_reference(&self) -> bool {
        let r = &self.record;
        self.nested
            && r.pref_labels.is_empty()
            && r.alt_labels.is_empty()
            && r.definitions.is_empty()
            && r.broader.is_empty()
            && r.narrower.is_empty()
            && r.related.is_empty()
    }
}

/// Record the nested node element `about` as the target of `parent`'s
/// pending reference property.
fn link_nested(parent: &mut OpenConcept, about: Option<&str>) -> IngestResult<()> {
    let Some(kind) = parent.pending.take() else {
        return Ok(());
    };
    match about {
        Some(id) => {
            parent.reference(kind, Some(id.to_string()));
            Ok(())
        }
        None => Err(parse_error(format!(
            "nested concept under {} has no rdf:about",
            parent.record.id.as_deref().unwrap_or("an unidentified concept")
        ))),
    }
}

/// Reader for SKOS RDF/XML documents.
pub struct SkosXmlReader;

impl ConceptReader for SkosXmlReader {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Skos
    }

    fn read(&self, data: &[u8]) -> IngestResult<Vec<ConceptRecord>> {
        let source = std::str::from_utf8(data).map_err(parse_error)?;
        let mut reader = NsReader::from_str(source);
        reader.config_mut().trim_text(true);

        let mut records = Vec::new();
        let mut stack: Vec<OpenConcept> = Vec::new();

        loop {
            let (ns, event) = reader.read_resolved_event().map_err(parse_error)?;

            match event {
                Event::Start(e) => {
                    let kind = classify(&ns, e.local_name().as_ref());
                    match stack.last_mut() {
                        None if kind == Element::Concept => {
                            let about = rdf_attribute(&reader, &e, b"about")?;
                            stack.push(OpenConcept::new(about, false));
                        }
                        None => {}
                        Some(parent)
                            if kind == Element::Concept
                                && parent.depth == 2
                                && parent.pending.is_some() =>
                        {
                            let about = rdf_attribute(&reader, &e, b"about")?;
                            link_nested(parent, about.as_deref())?;
                            stack.push(OpenConcept::new(about, true));
                        }
                        Some(concept) => {
                            concept.depth += 1;
                            if concept.depth == 2 {
                                match kind {
                                    Element::PrefLabel
                                    | Element::AltLabel
                                    | Element::Definition => {
                                        concept.field = Some(kind);
                                        concept.text.clear();
                                    }
                                    _ => {
                                        let resource = rdf_attribute(&reader, &e, b"resource")?;
                                        concept.reference(kind, resource);
                                    }
                                }
                            }
                        }
                    }
                }
                Event::Empty(e) => {
                    let kind = classify(&ns, e.local_name().as_ref());
                    match stack.last_mut() {
                        None if kind == Element::Concept => {
                            let about = rdf_attribute(&reader, &e, b"about")?;
                            records.push(OpenConcept::new(about, false).record);
                        }
                        None => {}
                        Some(concept) if concept.depth == 1 => {
                            let resource = rdf_attribute(&reader, &e, b"resource")?;
                            if resource.is_some() {
                                concept.reference(kind, resource);
                            }
                        }
                        Some(parent)
                            if kind == Element::Concept
                                && parent.depth == 2
                                && parent.pending.is_some() =>
                        {
                            let about = rdf_attribute(&reader, &e, b"about")?;
                            link_nested(parent, about.as_deref())?;
                        }
                        Some(_) => {}
                    }
                }
                Event::Text(e) => {
                    if let Some(concept) = stack.last_mut().filter(|c| c.field.is_some()) {
                        let text = e.unescape().map_err(parse_error)?;
                        concept.text.push_str(&text);
                    }
                }
                Event::CData(e) => {
                    if let Some(concept) = stack.last_mut().filter(|c| c.field.is_some()) {
                        concept.text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Event::End(_) => {
                    let Some(concept) = stack.last_mut() else {
                        continue;
                    };
                    if concept.depth == 2 {
                        concept.close_field();
                        if concept.pending.take().is_some() {
                            tracing::warn!(
                                id = ?concept.record.id,
                                "reference property without rdf:resource or nested concept"
                            );
                        }
                    }
                    concept.depth -= 1;
                    if concept.depth > 0 {
                        continue;
                    }
                    if let Some(done) = stack.pop() {
                        if done.skip {
                            tracing::debug!(
                                id = ?done.record.id,
                                "skipping non-concept description"
                            );
                        } else if done.is_bare_reference() {
                            tracing::debug!(
                                id = ?done.record.id,
                                "nested node only names its target"
                            );
                        } else {
                            records.push(done.record);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(parse_error("document ended inside a concept"));
        }
        Ok(records)
    }
}
