//! Base stack: functions, API routes and the deployments that publish them.

use super::StackBuilder;
use crate::config::Config;
use crate::endpoint::{Endpoint, EndpointCatalog};
use crate::naming;
use crate::resource::{Node, Resource, ResourceDocument};

pub const FUNCTION_TYPE: &str = "AWS::Serverless::Function";
pub const API_RESOURCE_TYPE: &str = "AWS::ApiGateway::Resource";
pub const API_METHOD_TYPE: &str = "AWS::ApiGateway::Method";
pub const DEPLOYMENT_TYPE: &str = "AWS::ApiGateway::Deployment";

/// Builds the long-lived base stack.
///
/// Per endpoint, in catalog order: a function, an API resource carrying the
/// route path, and a POST method proxying to the function. The method
/// invokes `${stageVariables.lambdaAlias}`, so one function resource serves
/// every alias. The configured deployments follow, each depending on every
/// method so no stage is published before all routes exist.
#[derive(Debug, Clone)]
pub struct BaseStackBuilder<'a> {
    config: &'a Config,
}

impl<'a> BaseStackBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    fn function(&self, endpoint: &Endpoint) -> Resource {
        Resource::new(naming::function_id(&endpoint.name), FUNCTION_TYPE)
            .property(
                "FunctionName",
                naming::function_name(&self.config.function_prefix, &endpoint.name),
            )
            .property("Handler", self.config.handler_for(&endpoint.name))
            .property("Role", self.config.role_arn.as_str())
    }

    fn api_resource(&self, endpoint: &Endpoint) -> Resource {
        let api = &self.config.rest_api_id;
        Resource::new(naming::api_resource_id(&endpoint.name), API_RESOURCE_TYPE)
            .property("RestApiId", format!("!Ref {api}"))
            .property("ParentId", format!("!GetAtt {api}.RootResourceId"))
            .property("PathPart", endpoint.route_path.as_str())
    }

    fn api_method(&self, endpoint: &Endpoint) -> Resource {
        let uri = format!(
            "!Sub \"arn:aws:apigateway:${{AWS::Region}}:lambda:path/2015-03-31/functions/${{{}.Arn}}:${{!stageVariables.lambdaAlias}}/invocations\"",
            naming::function_id(&endpoint.name)
        );
        Resource::new(naming::api_method_id(&endpoint.name), API_METHOD_TYPE)
            .property("RestApiId", format!("!Ref {}", self.config.rest_api_id))
            .property(
                "ResourceId",
                format!("!Ref {}", naming::api_resource_id(&endpoint.name)),
            )
            .property("HttpMethod", "POST")
            .property("AuthorizationType", "NONE")
            .property(
                "Integration",
                Node::map([
                    ("Type", "AWS_PROXY".to_string()),
                    ("IntegrationHttpMethod", "POST".to_string()),
                    ("Uri", uri),
                    ("Credentials", self.config.role_arn.clone()),
                ]),
            )
    }

    fn deployment(&self, logical_id: &str, catalog: &EndpointCatalog) -> Resource {
        catalog.iter().fold(
            Resource::new(logical_id, DEPLOYMENT_TYPE)
                .property("RestApiId", format!("!Ref {}", self.config.rest_api_id)),
            |deployment, endpoint| deployment.depends_on(naming::api_method_id(&endpoint.name)),
        )
    }
}

impl StackBuilder for BaseStackBuilder<'_> {
    fn build(&self, catalog: &EndpointCatalog) -> crate::Result<ResourceDocument> {
        let mut doc = ResourceDocument::new();
        for endpoint in catalog {
            log::debug!("Base resources for {} at /{}", endpoint.name, endpoint.route_path);
            doc.push(self.function(endpoint));
            doc.push(self.api_resource(endpoint));
            doc.push(self.api_method(endpoint));
        }
        for logical_id in &self.config.deployments {
            doc.push(self.deployment(logical_id, catalog));
        }
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::EndpointRegistry;

    fn catalog() -> EndpointCatalog {
        let registry = EndpointRegistry::new()
            .route_at("SOAPProxy", "MapMEWebServices.asmx")
            .route("CheckStatus")
            .route("MyIP");
        EndpointCatalog::from_source(&registry).unwrap()
    }

    fn count_type(doc: &ResourceDocument, resource_type: &str) -> usize {
        doc.resources()
            .iter()
            .filter(|r| r.resource_type == resource_type)
            .count()
    }

    #[test]
    fn test_one_declaration_set_per_endpoint() {
        let config = Config::default();
        let doc = BaseStackBuilder::new(&config).build(&catalog()).unwrap();

        assert_eq!(count_type(&doc, FUNCTION_TYPE), 3);
        assert_eq!(count_type(&doc, API_RESOURCE_TYPE), 3);
        assert_eq!(count_type(&doc, API_METHOD_TYPE), 3);
        assert_eq!(count_type(&doc, DEPLOYMENT_TYPE), 2);
        assert_eq!(doc.len(), 11);
    }

    #[test]
    fn test_deployments_depend_on_every_method_in_order() {
        let config = Config::default();
        let doc = BaseStackBuilder::new(&config).build(&catalog()).unwrap();

        let expected = vec![
            "SOAPProxyAPIMethod".to_string(),
            "CheckStatusAPIMethod".to_string(),
            "MyIPAPIMethod".to_string(),
        ];
        for id in ["StagingDeployment", "ProdDeployment"] {
            let deployment = doc.get(id).unwrap();
            assert_eq!(deployment.depends_on, expected);
        }
    }

    #[test]
    fn test_route_and_function_wiring() {
        let config = Config::default();
        let doc = BaseStackBuilder::new(&config).build(&catalog()).unwrap();

        let function = doc.get("SOAPProxyFunction").unwrap();
        assert_eq!(function.scalar("FunctionName"), Some("nway-SOAPProxy"));
        assert_eq!(function.scalar("Handler"), Some("nwayapi::nWAY.API::SOAPProxy"));

        let resource = doc.get("SOAPProxyAPIResource").unwrap();
        assert_eq!(resource.scalar("PathPart"), Some("MapMEWebServices.asmx"));
        assert_eq!(resource.scalar("ParentId"), Some("!GetAtt nWAYApi.RootResourceId"));

        let method = doc.get("SOAPProxyAPIMethod").unwrap();
        assert_eq!(method.scalar("ResourceId"), Some("!Ref SOAPProxyAPIResource"));
        assert_eq!(method.scalar("HttpMethod"), Some("POST"));
        assert_eq!(method.scalar("AuthorizationType"), Some("NONE"));
    }

    #[test]
    fn test_rendered_method_block() {
        let config = Config::default();
        let catalog = EndpointCatalog::from_source(&EndpointRegistry::new().route_at("CheckStatus", "status"))
            .unwrap();
        let text = BaseStackBuilder::new(&config).render(&catalog).unwrap();

        let expected = concat!(
            "\n",
            "  CheckStatusAPIMethod:\n",
            "    Type: AWS::ApiGateway::Method\n",
            "    Properties:\n",
            "      RestApiId: !Ref nWAYApi\n",
            "      ResourceId: !Ref CheckStatusAPIResource\n",
            "      HttpMethod: POST\n",
            "      AuthorizationType: NONE\n",
            "      Integration:\n",
            "        Type: AWS_PROXY\n",
            "        IntegrationHttpMethod: POST\n",
            "        Uri: !Sub \"arn:aws:apigateway:${AWS::Region}:lambda:path/2015-03-31/functions/${CheckStatusFunction.Arn}:${!stageVariables.lambdaAlias}/invocations\"\n",
            "        Credentials: !Sub \"arn:aws:iam::${AWS::AccountId}:role/nway-lambdas\"\n",
            "\n",
        );
        assert!(text.contains(expected), "{text}");
        assert!(text.contains("      PathPart: status\n"));
    }

    #[test]
    fn test_empty_catalog_keeps_deployments() {
        let config = Config::default();
        let doc = BaseStackBuilder::new(&config)
            .build(&EndpointCatalog::default())
            .unwrap();
        assert_eq!(doc.len(), 2);
        assert!(doc.resources().iter().all(|r| r.depends_on.is_empty()));
    }
}
