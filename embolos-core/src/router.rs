//! HTTP request router
//!
//! Maps method + path pairs onto store operations and serializes results
//! as JSON. Routing is case-sensitive and exact; the item namespace
//! distinguishes an unparseable key (400) from a missing record (404).
//! Handling is synchronous and runs inside the loop iteration that
//! services the transport.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde::Serialize;

use embolos_hal::fs::FlatStorage;

use crate::config::MAX_BASE_LIST;
use crate::error::Error;
use crate::store::{codec, BaseRecord, MetadataStore};
use crate::traits::http::{Method, Request, Response};

/// Editor page served at `/` (static asset, compiled in)
const INDEX_HTML: &str = include_str!("../assets/index.html");

const ITEM_PREFIX: &str = "/api/bases/";

#[derive(Serialize)]
struct BaseListBody {
    bases: Vec<String>,
}

#[derive(Serialize)]
struct BaseBody<'a> {
    rfid: String,
    paint_name: &'a str,
    recipe_name: &'a str,
    recipe_id: &'a str,
    notes: &'a str,
}

#[derive(Serialize)]
struct CurrentTagBody {
    rfid: String,
}

/// Router owning the metadata store and a read-only view of the tag latch
#[derive(Debug)]
pub struct RequestRouter<F: FlatStorage> {
    store: MetadataStore<F>,
    current_tag: u32,
}

impl<F: FlatStorage> RequestRouter<F> {
    /// Wrap an (already initialized) store; no tag is current yet
    pub fn new(store: MetadataStore<F>) -> Self {
        Self {
            store,
            current_tag: 0,
        }
    }

    /// Mirror the tag tracker's latch; called by the scheduler each
    /// polling cadence
    pub fn set_current_tag(&mut self, tag_id: u32) {
        self.current_tag = tag_id;
    }

    pub fn current_tag(&self) -> u32 {
        self.current_tag
    }

    /// Dispatch one request
    pub fn handle(&mut self, request: &Request) -> Response {
        match (request.method, request.path.as_str()) {
            (Method::Get, "/") | (Method::Get, "/index.html") => Response::html(INDEX_HTML),
            (Method::Get, "/api/rfid") => self.current_tag_body(),
            (Method::Get, "/api/bases") => self.list_bases(),
            (_, "/api/bases") => Response::text(405, "Method not allowed"),
            _ => match request.path.strip_prefix(ITEM_PREFIX) {
                Some(hex) => self.base_item(request, hex),
                None => Response::text(404, "Not found"),
            },
        }
    }

    fn base_item(&mut self, request: &Request, hex: &str) -> Response {
        let Some(tag_id) = parse_tag(hex) else {
            return Response::text(400, "Invalid RFID");
        };
        match request.method {
            Method::Get => self.get_base(tag_id),
            Method::Put => self.put_base(tag_id, &request.body),
            Method::Delete => self.delete_base(tag_id),
            Method::Other => Response::text(405, "Method not allowed"),
        }
    }

    fn get_base(&mut self, tag_id: u32) -> Response {
        match self.store.load(tag_id) {
            Ok(record) => json_body(&BaseBody {
                rfid: to_hex(tag_id),
                paint_name: record.paint_name(),
                recipe_name: record.recipe_name(),
                recipe_id: record.recipe_id(),
                notes: record.notes(),
            }),
            Err(Error::NotFound) => Response::text(404, "Base not found"),
            Err(_) => Response::text(500, "Storage failure"),
        }
    }

    fn put_base(&mut self, tag_id: u32, body: &str) -> Response {
        if body.is_empty() {
            return Response::text(400, "Missing body");
        }
        let record: BaseRecord = match codec::decode(body) {
            Ok(record) => record,
            Err(_) => return Response::text(400, "Invalid JSON"),
        };
        match self.store.save(tag_id, &record) {
            Ok(()) => Response::text(200, "OK"),
            Err(_) => Response::text(500, "Save failed"),
        }
    }

    fn delete_base(&mut self, tag_id: u32) -> Response {
        match self.store.remove(tag_id) {
            Ok(()) => Response::text(200, "OK"),
            Err(Error::NotFound) => Response::text(404, "Delete failed"),
            Err(_) => Response::text(500, "Storage failure"),
        }
    }

    fn list_bases(&mut self) -> Response {
        let keys = match self.store.list_keys(MAX_BASE_LIST) {
            Ok(keys) => keys,
            Err(_) => return Response::text(500, "Failed to list bases"),
        };
        json_body(&BaseListBody {
            bases: keys.iter().map(|&id| to_hex(id)).collect(),
        })
    }

    fn current_tag_body(&self) -> Response {
        let rfid = if self.current_tag != 0 {
            to_hex(self.current_tag)
        } else {
            String::new()
        };
        json_body(&CurrentTagBody { rfid })
    }
}

fn to_hex(tag_id: u32) -> String {
    format!("{tag_id:08X}")
}

/// Parse an item key; `None` for non-hex, overflow, or the reserved 0
fn parse_tag(hex: &str) -> Option<u32> {
    match u32::from_str_radix(hex, 16) {
        Ok(0) | Err(_) => None,
        Ok(tag_id) => Some(tag_id),
    }
}

fn json_body<T: Serialize>(value: &T) -> Response {
    match serde_json::to_string(value) {
        Ok(body) => Response::json(body),
        Err(_) => Response::text(500, "Encode failed"),
    }
}
