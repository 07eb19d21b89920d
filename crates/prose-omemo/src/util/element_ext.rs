// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::str::FromStr;

use base64::{engine::general_purpose, Engine as _};
use minidom::{Element, ElementBuilder, NSChoice};

use crate::util::ParseError;

pub trait ElementExt {
    fn expect_is<'a>(
        &self,
        name: impl AsRef<str>,
        ns: impl Into<NSChoice<'a>>,
    ) -> Result<(), ParseError>;

    fn attr_req(&self, name: impl AsRef<str>) -> Result<&str, ParseError>;
    /// Parses a required attribute, e.g. a numeric id.
    fn attr_parse<T: FromStr>(&self, name: impl AsRef<str>) -> Result<T, ParseError>
    where
        ParseError: From<T::Err>;

    fn attr_bool(&self, name: impl AsRef<str>) -> Result<Option<bool>, ParseError>;

    fn child_req<'a>(
        &self,
        name: impl AsRef<str>,
        ns: impl Into<NSChoice<'a>>,
    ) -> Result<&Element, ParseError>;

    /// Depth-first search for the first element matching `name` and `ns`, including `self`.
    fn find_descendant<'a>(
        &self,
        name: impl AsRef<str>,
        ns: impl Into<NSChoice<'a>>,
    ) -> Option<&Element>;

    /// Decodes the element's text as base64. Whitespace (line breaks emitted by some clients)
    /// is ignored.
    fn base64_text(&self) -> Result<Box<[u8]>, ParseError>;
}

pub trait ElementBuilderExt {
    fn attr_bool_opt(self, name: impl AsRef<str>, value: Option<bool>) -> ElementBuilder;
    fn append_base64(self, data: impl AsRef<[u8]>) -> ElementBuilder;
}

impl ElementExt for Element {
    fn expect_is<'a>(
        &self,
        name: impl AsRef<str>,
        ns: impl Into<NSChoice<'a>>,
    ) -> Result<(), ParseError> {
        let ns = ns.into();
        if !self.is(&name, ns) {
            return Err(ParseError::Generic {
                msg: format!(
                    "Expected element with name {} and namespace {}. Got {} and {} instead.",
                    name.as_ref(),
                    ns_choice_to_string(ns),
                    self.name(),
                    self.ns()
                ),
            });
        }
        Ok(())
    }

    fn attr_req(&self, name: impl AsRef<str>) -> Result<&str, ParseError> {
        self.attr(name.as_ref()).ok_or(ParseError::Generic {
            msg: format!(
                "Missing required attribute {} in element {}.",
                name.as_ref(),
                self.name()
            ),
        })
    }

    fn attr_parse<T: FromStr>(&self, name: impl AsRef<str>) -> Result<T, ParseError>
    where
        ParseError: From<T::Err>,
    {
        Ok(self.attr_req(name)?.trim().parse::<T>()?)
    }

    fn attr_bool(&self, name: impl AsRef<str>) -> Result<Option<bool>, ParseError> {
        self.attr(name.as_ref()).map(parse_bool).transpose()
    }

    fn child_req<'a>(
        &self,
        name: impl AsRef<str>,
        ns: impl Into<NSChoice<'a>>,
    ) -> Result<&Element, ParseError> {
        let ns = ns.into();
        self.get_child(name.as_ref(), ns)
            .ok_or_else(|| ParseError::Generic {
                msg: format!(
                    "Missing child {} ({}) in element {}.",
                    name.as_ref(),
                    ns_choice_to_string(ns),
                    self.name()
                ),
            })
    }

    fn find_descendant<'a>(
        &self,
        name: impl AsRef<str>,
        ns: impl Into<NSChoice<'a>>,
    ) -> Option<&Element> {
        let ns = ns.into();
        if self.is(name.as_ref(), ns) {
            return Some(self);
        }
        self.children()
            .find_map(|child| child.find_descendant(name.as_ref(), ns))
    }

    fn base64_text(&self) -> Result<Box<[u8]>, ParseError> {
        let text = self
            .text()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>();
        Ok(general_purpose::STANDARD.decode(text)?.into_boxed_slice())
    }
}

impl ElementBuilderExt for ElementBuilder {
    fn attr_bool_opt(self, name: impl AsRef<str>, value: Option<bool>) -> ElementBuilder {
        let Some(true) = value else { return self };
        self.attr(name.as_ref(), "true")
    }

    fn append_base64(self, data: impl AsRef<[u8]>) -> ElementBuilder {
        let data = data.as_ref();
        if data.is_empty() {
            return self;
        }
        self.append(general_purpose::STANDARD.encode(data))
    }
}

pub fn parse_bool(value: impl AsRef<str>) -> Result<bool, ParseError> {
    Ok(match value.as_ref() {
        "true" | "1" => true,
        "false" | "0" => false,
        _ => {
            return Err(ParseError::Generic {
                msg: format!("Unknown boolean value '{}'", value.as_ref()),
            })
        }
    })
}

fn ns_choice_to_string<'a>(ns: impl Into<NSChoice<'a>>) -> String {
    match ns.into() {
        NSChoice::None => "<none>".to_string(),
        NSChoice::OneOf(ns) => ns.to_string(),
        NSChoice::AnyOf(ns_list) => ns_list.join(" or "),
        NSChoice::Any => "<any>".to_string(),
    }
}
