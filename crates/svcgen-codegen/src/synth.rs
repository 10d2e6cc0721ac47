//! Wrapper class synthesis.
//!
//! Turns a [`ServiceDescriptor`] into the full text of a NestJS client
//! service file, and a list of generated wrappers into the re-export
//! index. The emitted class holds one lazily-bound client proxy field
//! and one promise-based adapter method per extracted signature.

use crate::template_engine::TemplateEngine;
use serde::Serialize;
use svcgen_core::{Result, Role, ServiceDescriptor};

/// Context for the `wrapper/service` template.
#[derive(Debug, Serialize)]
struct WrapperContext<'a> {
    class_name: String,
    service_name: &'a str,
    client_interface: &'a str,
    service_constant: &'a str,
    import_path: String,
    auxiliary_types: &'a [String],
    methods: &'a [svcgen_core::MethodSignature],
}

/// One entry of the re-export index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Import specifier relative to the index file, without the `.ts`
    /// extension (e.g. `gamehub-gateway.service`).
    pub file_stem: String,

    /// Exported wrapper class name.
    pub class_name: String,
}

/// Context for the `wrapper/index` template.
#[derive(Debug, Serialize)]
struct IndexContext<'a> {
    entries: &'a [IndexEntry],
}

/// Renders wrapper service files and the re-export index.
///
/// Rendering is pure: the same descriptor always yields byte-identical
/// output.
#[derive(Debug)]
pub struct Synthesizer {
    engine: TemplateEngine<'static>,
}

impl Synthesizer {
    /// Creates a synthesizer with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns an error if template registration fails.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
        })
    }

    /// Renders the complete wrapper class source for one descriptor.
    ///
    /// The import statement pulls the client interface, the service
    /// constant (real or synthesized), and every auxiliary type from
    /// the originating definition file's own module path:
    /// `<import_prefix>/<base>.<source_role>`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use svcgen_codegen::{Synthesizer, extract_service};
    /// use svcgen_core::Role;
    ///
    /// let content = r#"
    /// export const GAME_SERVICE_NAME = "GameService";
    /// export interface GameServiceClient {
    ///   listGamesAll(request: ListGamesRequest, metadata: Metadata, ...rest: any): Observable<ListGamesResult>;
    /// }
    /// "#;
    /// let descriptor = extract_service(content, "gamehub-gateway").unwrap();
    ///
    /// let synth = Synthesizer::new().unwrap();
    /// let types_role = Role::new("types").unwrap();
    /// let source = synth.render_wrapper(&descriptor, "../types", &types_role).unwrap();
    /// assert!(source.contains("export class GameServiceClientService"));
    /// ```
    pub fn render_wrapper(
        &self,
        descriptor: &ServiceDescriptor,
        import_prefix: &str,
        source_role: &Role,
    ) -> Result<String> {
        let context = WrapperContext {
            class_name: descriptor.class_name(),
            service_name: &descriptor.service_name,
            client_interface: &descriptor.client_interface,
            service_constant: &descriptor.constant.name,
            import_path: format!(
                "{import_prefix}/{}.{source_role}",
                descriptor.import_base
            ),
            auxiliary_types: &descriptor.auxiliary_types,
            methods: &descriptor.methods,
        };

        self.engine.render("wrapper/service", &context)
    }

    /// Renders the index file re-exporting every generated wrapper.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_index(&self, entries: &[IndexEntry]) -> Result<String> {
        self.engine.render("wrapper/index", &IndexContext { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svcgen_core::{MethodSignature, ServiceConstant};

    fn game_service_descriptor() -> ServiceDescriptor {
        ServiceDescriptor {
            service_name: "GameService".to_string(),
            client_interface: "GameServiceClient".to_string(),
            constant: ServiceConstant::found("GAME_SERVICE_NAME".to_string()),
            import_base: "gamehub-gateway".to_string(),
            methods: vec![MethodSignature {
                name: "listGamesAll".to_string(),
                request_type: "ListGamesRequest".to_string(),
                response_type: "ListGamesResult".to_string(),
            }],
            auxiliary_types: vec![
                "ListGamesRequest".to_string(),
                "ListGamesResult".to_string(),
            ],
        }
    }

    fn render(descriptor: &ServiceDescriptor) -> String {
        let synth = Synthesizer::new().unwrap();
        let role = Role::new("types").unwrap();
        synth.render_wrapper(descriptor, "../types", &role).unwrap()
    }

    #[test]
    fn test_wrapper_class_structure() {
        let source = render(&game_service_descriptor());

        assert!(source.contains("@Injectable()"));
        assert!(source.contains("export class GameServiceClientService implements OnModuleInit"));
        assert!(source.contains("private service!: GameServiceClient;"));
        assert!(source.contains(
            "this.service = this.client.getService<GameServiceClient>(GAME_SERVICE_NAME);"
        ));
    }

    #[test]
    fn test_adapter_method_awaits_single_emission() {
        let source = render(&game_service_descriptor());

        assert!(source.contains(
            "async listGamesAll(request: ListGamesRequest, metadata?: Metadata): \
             Promise<ListGamesResult>"
        ));
        assert!(source.contains("const grpcMetadata = metadata || new Metadata();"));
        assert!(
            source.contains("return firstValueFrom(this.service.listGamesAll(request, grpcMetadata));")
        );
    }

    #[test]
    fn test_import_list_order_and_module_path() {
        let source = render(&game_service_descriptor());

        // Interface first, constant second, auxiliary types after, all
        // from the definition file's own module path.
        let expected = "import {\n  GameServiceClient,\n  GAME_SERVICE_NAME,\n  \
                        ListGamesRequest,\n  ListGamesResult\n} from '../types/gamehub-gateway.types';";
        assert!(source.contains(expected), "import block mismatch:\n{source}");
    }

    #[test]
    fn test_synthesized_constant_is_imported() {
        let mut descriptor = game_service_descriptor();
        descriptor.constant = ServiceConstant::synthesized_for("GameService");

        let source = render(&descriptor);
        assert!(source.contains("GAMESERVICE_SERVICE_NAME,"));
        assert!(source.contains("getService<GameServiceClient>(GAMESERVICE_SERVICE_NAME);"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let descriptor = game_service_descriptor();
        let first = render(&descriptor);
        let second = render(&descriptor);
        assert_eq!(first, second);
    }

    #[test]
    fn test_descriptor_without_auxiliary_types() {
        let mut descriptor = game_service_descriptor();
        descriptor.auxiliary_types.clear();

        let source = render(&descriptor);
        assert!(source.contains(
            "import {\n  GameServiceClient,\n  GAME_SERVICE_NAME\n} from '../types/gamehub-gateway.types';"
        ));
    }

    #[test]
    fn test_index_rendering() {
        let synth = Synthesizer::new().unwrap();
        let entries = vec![
            IndexEntry {
                file_stem: "gamehub-gateway.service".to_string(),
                class_name: "GameServiceClientService".to_string(),
            },
            IndexEntry {
                file_stem: "session.service".to_string(),
                class_name: "SessionServiceClientService".to_string(),
            },
        ];

        let index = synth.render_index(&entries).unwrap();
        assert!(
            index.contains("import { GameServiceClientService } from './gamehub-gateway.service';")
        );
        assert!(index.contains("import { SessionServiceClientService } from './session.service';"));
        assert!(index.contains("export {\n  GameServiceClientService,\n  SessionServiceClientService,\n};"));
    }

    #[test]
    fn test_empty_index_is_valid() {
        let synth = Synthesizer::new().unwrap();
        let index = synth.render_index(&[]).unwrap();
        assert!(index.contains("export {"));
    }
}
