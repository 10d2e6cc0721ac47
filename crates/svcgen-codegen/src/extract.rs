//! Structural fact extraction from definition files.
//!
//! Scans the raw text of one ts-proto definition file for a closed set
//! of recognizable shapes instead of parsing a TypeScript grammar:
//! - the client interface declaration (`export interface FooClient`),
//! - the matching service-name constant,
//! - exported type/enum/alias declarations,
//! - client method signatures in the three-argument,
//!   single-item-stream calling shape.
//!
//! Each matcher is independent and returns an optional fact; a file
//! with no client interface or no extractable methods is simply not a
//! service file, which is a normal outcome rather than an error.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use svcgen_core::{MethodSignature, ServiceConstant, ServiceDescriptor};

/// Literal substring every client-interface declaration contains.
///
/// Used by the batch generator as a cheap pre-filter before invoking
/// the extractor. The extractor stays authoritative.
pub const CLIENT_MARKER: &str = "Client";

// Pre-compiled regexes (compiled once, reused)
static CLIENT_INTERFACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export interface (\w+Client)").expect("valid regex"));
static TYPE_DECL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export (?:interface|enum|type) (\w+)").expect("valid regex"));
static METHOD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w+)\(request: (\w+), metadata: Metadata, \.\.\.rest: any\): Observable<(\w+)>")
        .expect("valid regex")
});

/// Extracts a [`ServiceDescriptor`] from the text of one definition
/// file.
///
/// Returns `None` when the file is not a service file: it lacks a
/// client-interface declaration, or has one but no method signature
/// matching the recognized calling shape. Both outcomes are logged and
/// the caller is expected to skip the file silently.
///
/// `import_base` is the file's base identifier (file name minus its
/// role suffix); it becomes the module path the generated wrapper
/// imports from.
///
/// # Examples
///
/// ```
/// use svcgen_codegen::extract_service;
///
/// let content = r#"
/// export const GAME_SERVICE_NAME = "GameService";
/// export interface ListGamesRequest {}
/// export interface ListGamesResult {}
/// export interface GameServiceClient {
///   listGamesAll(request: ListGamesRequest, metadata: Metadata, ...rest: any): Observable<ListGamesResult>;
/// }
/// "#;
///
/// let descriptor = extract_service(content, "gamehub-gateway").unwrap();
/// assert_eq!(descriptor.service_name, "GameService");
/// assert_eq!(descriptor.methods.len(), 1);
/// ```
#[must_use]
pub fn extract_service(content: &str, import_base: &str) -> Option<ServiceDescriptor> {
    let Some(client_interface) = find_client_interface(content) else {
        tracing::debug!("no client interface declaration, not a service file");
        return None;
    };

    let service_name = client_interface
        .strip_suffix("Client")
        .unwrap_or(&client_interface)
        .to_string();

    let methods = collect_methods(content);
    if methods.is_empty() {
        // A client interface with no extractable methods cannot
        // produce a useful wrapper.
        tracing::debug!(
            interface = %client_interface,
            "client interface has no extractable methods, not a service file"
        );
        return None;
    }

    let constant = find_service_constant(content, &service_name);
    if constant.synthesized {
        tracing::warn!(
            service = %service_name,
            constant = %constant.name,
            "no service-name constant found, using synthesized fallback"
        );
    }

    let auxiliary_types = collect_exported_types(content, &client_interface);

    Some(ServiceDescriptor {
        service_name,
        client_interface,
        constant,
        import_base: import_base.to_string(),
        methods,
        auxiliary_types,
    })
}

/// Finds the client-interface declaration, if any.
fn find_client_interface(content: &str) -> Option<String> {
    CLIENT_INTERFACE_REGEX
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Finds the constant whose literal value equals the service name.
///
/// Falls back to the deterministic synthesized name when absent.
fn find_service_constant(content: &str, service_name: &str) -> ServiceConstant {
    let pattern = format!(
        r#"export const ([A-Z_]+) = "{}""#,
        regex::escape(service_name)
    );
    let constant_regex = Regex::new(&pattern).expect("valid regex");

    constant_regex
        .captures(content)
        .and_then(|c| c.get(1))
        .map_or_else(
            || ServiceConstant::synthesized_for(service_name),
            |m| ServiceConstant::found(m.as_str().to_string()),
        )
}

/// Collects exported type/enum/alias names in file order.
///
/// Deduplicated by name, first occurrence wins; the client interface
/// itself is excluded.
fn collect_exported_types(content: &str, client_interface: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut types = Vec::new();

    for cap in TYPE_DECL_REGEX.captures_iter(content) {
        let name = &cap[1];
        if name != client_interface && seen.insert(name.to_string()) {
            types.push(name.to_string());
        }
    }

    types
}

/// Collects method signatures matching the fixed calling shape.
///
/// Source order, deduplicated by method name (first occurrence wins).
/// Signatures of any other shape are skipped without comment.
fn collect_methods(content: &str) -> Vec<MethodSignature> {
    let mut seen = HashSet::new();
    let mut methods = Vec::new();

    for cap in METHOD_REGEX.captures_iter(content) {
        let name = cap[1].to_string();
        if seen.insert(name.clone()) {
            methods.push(MethodSignature {
                name,
                request_type: cap[2].to_string(),
                response_type: cap[3].to_string(),
            });
        }
    }

    methods
}
