//! Orchestra XML repository parser.
//!
//! This module parses FIX Orchestra repository documents into the
//! in-memory entity records. Element names are matched on their local
//! part, so documents using the `fixr:` prefix (or none) are accepted alike.

use crate::error::ParseError;
use crate::messages::{Component, Group, Member, MemberRef, Message, Presence};
use crate::types::{
    Annotation, Category, Code, CodeSet, Datatype, Field, KeyValue, LogicalType, MappedDatatype,
    Repository, Section,
};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// Parses an Orchestra repository from a string.
///
/// # Arguments
/// * `xml` - Orchestra XML content
///
/// # Returns
/// Parsed repository or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, has no `repository` root,
/// or an entity lacks a required attribute.
pub fn parse_repository(xml: &str) -> Result<Repository, ParseError> {
    let mut reader = Reader::from_str(xml);
    // Text is split around entity references, so whitespace is kept here and
    // normalised once the documentation is assembled.
    reader.config_mut().trim_text(false);

    let mut repository: Option<Repository> = None;
    let mut open = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = local_name(e)?;
                if name == "repository" {
                    repository = Some(parse_repository_attrs(e)?);
                    open = true;
                } else if let Some(repo) = repository.as_mut() {
                    parse_top_level(&mut reader, &name, repo)?;
                }
            }
            Ok(Event::Empty(ref e)) => {
                if local_name(e)? == "repository" {
                    repository = Some(parse_repository_attrs(e)?);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"repository" {
                    open = false;
                }
            }
            Ok(Event::Eof) if open => return Err(unexpected_eof()),
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let repository =
        repository.ok_or_else(|| ParseError::structure("No repository element found"))?;

    tracing::debug!(
        "Parsed repository {} {}: {} datatypes, {} code sets, {} fields, {} components, {} groups, {} messages",
        repository.name,
        repository.version,
        repository.datatypes.len(),
        repository.code_sets.len(),
        repository.fields.len(),
        repository.components.len(),
        repository.groups.len(),
        repository.messages.len()
    );

    Ok(repository)
}

/// Parses an Orchestra repository file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_repository_file(path: &Path) -> Result<Repository, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_repository(&xml)
}

/// Dispatches a direct child of the repository element.
fn parse_top_level(
    reader: &mut Reader<&[u8]>,
    name: &str,
    repo: &mut Repository,
) -> Result<(), ParseError> {
    match name {
        "datatypes" => repo.datatypes = parse_list(reader, "datatype", parse_datatype)?,
        "codeSets" => repo.code_sets = parse_list(reader, "codeSet", parse_code_set)?,
        "fields" => repo.fields = parse_list(reader, "field", parse_field)?,
        "components" => repo.components = parse_list(reader, "component", parse_component)?,
        "groups" => repo.groups = parse_list(reader, "group", parse_group)?,
        "messages" => repo.messages = parse_list(reader, "message", parse_message)?,
        "categories" => repo.categories = parse_list(reader, "category", parse_category)?,
        "sections" => repo.sections = parse_list(reader, "section", parse_section)?,
        _ => skip_to_end(reader)?,
    }
    Ok(())
}

/// Parses the repository element attributes.
fn parse_repository_attrs(e: &BytesStart<'_>) -> Result<Repository, ParseError> {
    let mut repository = Repository::default();

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => repository.name = value,
            "version" => repository.version = value,
            _ => {}
        }
    }

    Ok(repository)
}

/// Parses a list element whose children of kind `child` become entities.
fn parse_list<T>(
    reader: &mut Reader<&[u8]>,
    child: &str,
    mut parse: impl FnMut(&mut Reader<&[u8]>, &BytesStart<'_>, bool) -> Result<T, ParseError>,
) -> Result<Vec<T>, ParseError> {
    let mut items = Vec::new();
    visit_children(reader, |reader, e, name, has_body| {
        if name == child {
            items.push(parse(reader, e, has_body)?);
            Ok(true)
        } else {
            Ok(false)
        }
    })?;
    Ok(items)
}

/// Parses a datatype definition.
fn parse_datatype(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<Datatype, ParseError> {
    let mut name = None;
    let mut base_type = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "baseType" => base_type = Some(value),
            _ => {}
        }
    }

    let mut datatype = Datatype::new(name.ok_or_else(|| ParseError::missing_attr("datatype", "name"))?);
    datatype.base_type = base_type;

    if has_body {
        visit_children(reader, |reader, e, name, has_body| match name {
            "mappedDatatype" => {
                datatype
                    .mappings
                    .push(parse_mapped_datatype(reader, e, has_body)?);
                Ok(true)
            }
            "annotation" if has_body => {
                datatype.annotation = parse_annotation(reader)?;
                Ok(true)
            }
            _ => Ok(false),
        })?;
    }

    Ok(datatype)
}

/// Parses a mapping of a datatype to another standard.
fn parse_mapped_datatype(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<MappedDatatype, ParseError> {
    let mut standard = None;
    let mut base = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "standard" => standard = Some(value),
            "base" => base = Some(value),
            _ => {}
        }
    }

    let standard = standard.ok_or_else(|| ParseError::missing_attr("mappedDatatype", "standard"))?;
    let mut mapped = MappedDatatype::new(standard, base);

    if has_body {
        visit_children(reader, |reader, _e, name, has_body| {
            if name == "extension" && has_body {
                mapped.extension = parse_extension(reader)?;
                Ok(true)
            } else {
                Ok(false)
            }
        })?;
    }

    Ok(mapped)
}

/// Parses a mapping extension, keeping the first logical type found.
fn parse_extension(reader: &mut Reader<&[u8]>) -> Result<Option<LogicalType>, ParseError> {
    let mut logical_type = None;

    visit_children(reader, |reader, e, name, has_body| {
        if name == "logicalType" {
            let parsed = parse_logical_type(reader, e, has_body)?;
            logical_type.get_or_insert(parsed);
            Ok(true)
        } else {
            Ok(false)
        }
    })?;

    Ok(logical_type)
}

/// Parses a logical type and its key/value properties.
fn parse_logical_type(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<LogicalType, ParseError> {
    let name = attributes(e)?
        .into_iter()
        .find_map(|(key, value)| (key == "name").then_some(value))
        .ok_or_else(|| ParseError::missing_attr("logicalType", "name"))?;

    let mut logical_type = LogicalType::new(name);

    if has_body {
        visit_children(reader, |_reader, e, name, has_body| {
            if name != "keyValue" {
                return Ok(false);
            }
            let mut key = None;
            let mut value = None;
            for (k, v) in attributes(e)? {
                match k.as_str() {
                    "key" => key = Some(v),
                    "value" => value = Some(v),
                    _ => {}
                }
            }
            logical_type.key_values.push(KeyValue {
                key: key.ok_or_else(|| ParseError::missing_attr("keyValue", "key"))?,
                value: value.unwrap_or_default(),
            });
            // A keyValue with content is skipped by the caller.
            Ok(!has_body)
        })?;
    }

    Ok(logical_type)
}

/// Parses a code set definition.
fn parse_code_set(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<CodeSet, ParseError> {
    let mut name = None;
    let mut id = None;
    let mut type_name = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "id" => id = Some(parse_id("codeSet", "id", &value)?),
            "type" => type_name = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("codeSet", "name"))?;
    let type_name = type_name.ok_or_else(|| ParseError::missing_attr("codeSet", "type"))?;
    let mut code_set = CodeSet::new(name, type_name);
    code_set.id = id;

    if has_body {
        visit_children(reader, |reader, e, name, has_body| match name {
            "code" => {
                code_set.add_code(parse_code(reader, e, has_body)?);
                Ok(true)
            }
            "annotation" if has_body => {
                code_set.annotation = parse_annotation(reader)?;
                Ok(true)
            }
            _ => Ok(false),
        })?;
    }

    Ok(code_set)
}

/// Parses a single code.
fn parse_code(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<Code, ParseError> {
    let mut name = None;
    let mut value = String::new();
    let mut id = None;

    for (key, attr) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(attr),
            "value" => value = attr,
            "id" => id = Some(parse_id("code", "id", &attr)?),
            _ => {}
        }
    }

    let mut code = Code::new(name.ok_or_else(|| ParseError::missing_attr("code", "name"))?, value);
    code.id = id;
    if has_body {
        code.annotation = parse_reference_body(reader)?;
    }

    Ok(code)
}

/// Parses a field definition.
fn parse_field(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<Field, ParseError> {
    let mut id = None;
    let mut name = None;
    let mut type_name = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "id" => id = Some(parse_id("field", "id", &value)?),
            "name" => name = Some(value),
            "type" => type_name = Some(value),
            _ => {}
        }
    }

    let mut field = Field::new(
        id.ok_or_else(|| ParseError::missing_attr("field", "id"))?,
        name.ok_or_else(|| ParseError::missing_attr("field", "name"))?,
        type_name.ok_or_else(|| ParseError::missing_attr("field", "type"))?,
    );
    if has_body {
        field.annotation = parse_reference_body(reader)?;
    }

    Ok(field)
}

/// Parses a component definition.
fn parse_component(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<Component, ParseError> {
    let (id, name, category) = parse_structural_attrs("component", e)?;
    let mut component = Component::new(id, name);
    component.category = category;

    if has_body {
        let layout = parse_layout(reader)?;
        component.members = layout.members;
        component.annotation = layout.annotation;
    }

    Ok(component)
}

/// Parses a repeating group definition.
fn parse_group(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<Group, ParseError> {
    let (id, name, category) = parse_structural_attrs("group", e)?;

    let layout = if has_body {
        parse_layout(reader)?
    } else {
        Layout::default()
    };
    let num_in_group = layout
        .num_in_group
        .ok_or_else(|| ParseError::structure(format!("group '{name}' has no numInGroup")))?;

    let mut group = Group::new(id, name, num_in_group);
    group.category = category;
    group.members = layout.members;
    group.annotation = layout.annotation;

    Ok(group)
}

/// Parses a message definition.
fn parse_message(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<Message, ParseError> {
    let mut id = None;
    let mut name = None;
    let mut msg_type = None;
    let mut category = String::new();

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "id" => id = Some(parse_id("message", "id", &value)?),
            "name" => name = Some(value),
            "msgType" => msg_type = Some(value),
            "category" => category = value,
            _ => {}
        }
    }

    let mut message = Message::new(
        name.ok_or_else(|| ParseError::missing_attr("message", "name"))?,
        category,
    );
    message.id = id;
    message.msg_type = msg_type;

    if has_body {
        let layout = parse_layout(reader)?;
        message.members = layout.members;
        message.annotation = layout.annotation;
    }

    Ok(message)
}

/// Parses a message category.
fn parse_category(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<Category, ParseError> {
    let mut name = None;
    let mut section = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "section" => section = Some(value),
            _ => {}
        }
    }

    Ok(Category {
        name: name.ok_or_else(|| ParseError::missing_attr("category", "name"))?,
        section,
        annotation: if has_body {
            parse_reference_body(reader)?
        } else {
            Annotation::default()
        },
    })
}

/// Parses a section.
fn parse_section(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<Section, ParseError> {
    let name = attributes(e)?
        .into_iter()
        .find_map(|(key, value)| (key == "name").then_some(value))
        .ok_or_else(|| ParseError::missing_attr("section", "name"))?;

    Ok(Section {
        name,
        annotation: if has_body {
            parse_reference_body(reader)?
        } else {
            Annotation::default()
        },
    })
}

/// Reads the id, name and category attributes shared by components and groups.
fn parse_structural_attrs(
    element: &str,
    e: &BytesStart<'_>,
) -> Result<(u32, String, Option<String>), ParseError> {
    let mut id = None;
    let mut name = None;
    let mut category = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "id" => id = Some(parse_id(element, "id", &value)?),
            "name" => name = Some(value),
            "category" => category = Some(value),
            _ => {}
        }
    }

    Ok((
        id.ok_or_else(|| ParseError::missing_attr(element, "id"))?,
        name.ok_or_else(|| ParseError::missing_attr(element, "name"))?,
        category,
    ))
}

/// Members, annotation and count field of a component, group or message body.
#[derive(Debug, Default)]
struct Layout {
    members: Vec<Member>,
    annotation: Annotation,
    num_in_group: Option<u32>,
}

/// Parses the body of a component, group or message.
///
/// A message `structure` element is flattened into the enclosing layout.
fn parse_layout(reader: &mut Reader<&[u8]>) -> Result<Layout, ParseError> {
    let mut layout = Layout::default();

    visit_children(reader, |reader, e, name, has_body| match name {
        "fieldRef" | "groupRef" | "componentRef" => {
            let mut reference = parse_member_ref(name, e)?;
            if has_body {
                reference.annotation = parse_reference_body(reader)?;
            }
            layout.members.push(match name {
                "fieldRef" => Member::Field(reference),
                "groupRef" => Member::Group(reference),
                _ => Member::Component(reference),
            });
            Ok(true)
        }
        "numInGroup" => {
            layout.num_in_group = Some(parse_member_ref(name, e)?.id);
            if has_body {
                parse_reference_body(reader)?;
            }
            Ok(true)
        }
        "structure" if has_body => {
            let structure = parse_layout(reader)?;
            layout.members.extend(structure.members);
            Ok(true)
        }
        "annotation" if has_body => {
            layout.annotation = parse_annotation(reader)?;
            Ok(true)
        }
        _ => Ok(false),
    })?;

    Ok(layout)
}

/// Parses the attributes of a member reference.
fn parse_member_ref(element: &str, e: &BytesStart<'_>) -> Result<MemberRef, ParseError> {
    let mut id = None;
    let mut presence = Presence::default();

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "id" => id = Some(parse_id(element, "id", &value)?),
            "presence" => presence = Presence::parse(&value),
            _ => {}
        }
    }

    Ok(MemberRef {
        id: id.ok_or_else(|| ParseError::missing_attr(element, "id"))?,
        presence,
        annotation: Annotation::default(),
    })
}

/// Parses an element body that may only carry an annotation of interest.
fn parse_reference_body(reader: &mut Reader<&[u8]>) -> Result<Annotation, ParseError> {
    let mut annotation = Annotation::default();

    visit_children(reader, |reader, _e, name, has_body| {
        if name == "annotation" && has_body {
            annotation = parse_annotation(reader)?;
            Ok(true)
        } else {
            Ok(false)
        }
    })?;

    Ok(annotation)
}

/// Parses an annotation, collecting the text of each documentation element.
fn parse_annotation(reader: &mut Reader<&[u8]>) -> Result<Annotation, ParseError> {
    let mut annotation = Annotation::default();

    visit_children(reader, |reader, _e, name, has_body| {
        if name == "documentation" && has_body {
            annotation.push(read_text(reader)?.trim());
            Ok(true)
        } else {
            Ok(false)
        }
    })?;

    Ok(annotation)
}

/// Reads all text up to the end of the current element, including the text
/// of nested markup.
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => {
                let raw = std::str::from_utf8(t.as_ref())?;
                text.push_str(&unescape(raw)?);
            }
            Ok(Event::CData(ref t)) => {
                text.push_str(std::str::from_utf8(t.as_ref())?);
            }
            Ok(Event::GeneralRef(ref r)) => {
                let entity = std::str::from_utf8(r.as_ref())?;
                match resolve_entity(entity) {
                    Some(c) => text.push(c),
                    None => {
                        text.push('&');
                        text.push_str(entity);
                        text.push(';');
                    }
                }
            }
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof()),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

/// Resolves a predefined or character entity reference.
fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => {
            let code = entity.strip_prefix('#')?;
            let value = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

/// Visits the child elements of the current element up to its end tag.
///
/// The visitor returns `true` when it consumed the child; unconsumed children
/// with content are skipped.
fn visit_children<F>(reader: &mut Reader<&[u8]>, mut visit: F) -> Result<(), ParseError>
where
    F: FnMut(&mut Reader<&[u8]>, &BytesStart<'_>, &str, bool) -> Result<bool, ParseError>,
{
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = local_name(e)?;
                if !visit(reader, e, &name, true)? {
                    skip_to_end(reader)?;
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = local_name(e)?;
                visit(reader, e, &name, false)?;
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => return Err(unexpected_eof()),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => return Err(unexpected_eof()),
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Error for a document that ends inside an open element.
fn unexpected_eof() -> ParseError {
    ParseError::structure("Unexpected end of document inside an open element")
}

/// Returns the element name without namespace prefix.
fn local_name(e: &BytesStart<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(e.local_name().as_ref())?.to_string())
}

/// Collects unprefixed attribute names with unescaped values.
fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
    let mut attrs = Vec::new();

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.local_name().as_ref())?.to_string();
        let raw = std::str::from_utf8(&attr.value)?;
        attrs.push((key, unescape(raw)?.into_owned()));
    }

    Ok(attrs)
}

/// Parses a numeric identifier attribute.
fn parse_id(element: &str, attribute: &str, value: &str) -> Result<u32, ParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseError::invalid_attr(element, attribute, value))
}
