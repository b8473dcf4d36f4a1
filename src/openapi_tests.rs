#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::openapi::PathItemType;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();

        for name in [
            "ErrorResponse",
            "HealthResponse",
            "CatSummary",
            "CatDetail",
            "CatImage",
            "CreateCatRequest",
            "AbilityResponse",
            "FightingStyleResponse",
            "UserResponse",
            "TokenResponse",
            "CatSummaryList",
        ] {
            assert!(components.schemas.contains_key(name), "missing schema {}", name);
        }

        // Verify that the schema can be serialized to JSON without errors
        assert!(serde_json::to_string(&openapi).is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let error_response_schema = components.schemas.get("ErrorResponse").unwrap();

        if let utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(obj)) = error_response_schema {
            let properties = &obj.properties;
            assert!(properties.contains_key("error"));
            assert!(properties.contains_key("code"));
            assert!(properties.contains_key("success"));
            assert!(properties.contains_key("fields"));
        } else {
            panic!("ErrorResponse should be an object schema");
        }
    }

    #[test]
    fn test_cat_summary_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let summary = components.schemas.get("CatSummary").unwrap();

        if let utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(obj)) = summary {
            let properties = &obj.properties;
            for field in ["id", "name", "dangerous", "abilities", "fighting_styles"] {
                assert!(properties.contains_key(field), "missing field {}", field);
            }
            assert!(!properties.contains_key("description"));
        } else {
            panic!("CatSummary should be an object schema");
        }
    }

    #[test]
    fn test_openapi_paths_and_methods() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        let expected = [
            ("/health", vec![PathItemType::Get]),
            ("/api/v1/cats/", vec![PathItemType::Get, PathItemType::Post]),
            (
                "/api/v1/cats/{id}/",
                vec![PathItemType::Get, PathItemType::Put, PathItemType::Patch, PathItemType::Delete],
            ),
            ("/api/v1/cats/{id}/upload-image/", vec![PathItemType::Post]),
            ("/api/v1/abilities/", vec![PathItemType::Get]),
            (
                "/api/v1/abilities/{id}/",
                vec![PathItemType::Put, PathItemType::Patch, PathItemType::Delete],
            ),
            ("/api/v1/fighting_styles/", vec![PathItemType::Get]),
            (
                "/api/v1/fighting_styles/{id}/",
                vec![PathItemType::Put, PathItemType::Patch, PathItemType::Delete],
            ),
            ("/api/v1/users/", vec![PathItemType::Post]),
            ("/api/v1/users/token/", vec![PathItemType::Post]),
            ("/api/v1/users/me/", vec![PathItemType::Get, PathItemType::Patch]),
        ];

        for (path, methods) in expected {
            let item = paths.get(path).unwrap_or_else(|| panic!("missing path {}", path));
            for method in methods {
                assert!(item.operations.contains_key(&method), "missing operation on {}", path);
            }
        }

        // Abilities have no retrieve operation
        let ability_item = paths.get("/api/v1/abilities/{id}/").unwrap();
        assert!(!ability_item.operations.contains_key(&PathItemType::Get));
    }

    #[test]
    fn test_token_security_scheme() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();

        assert!(components.security_schemes.contains_key("token"));

        let cats = openapi.paths.paths.get("/api/v1/cats/").unwrap();
        let list = cats.operations.get(&PathItemType::Get).unwrap();
        assert!(list.security.is_some());

        let register = openapi.paths.paths.get("/api/v1/users/").unwrap();
        let create = register.operations.get(&PathItemType::Post).unwrap();
        assert!(create.security.is_none());
    }

    #[test]
    fn test_health_responses() {
        let openapi = ApiDoc::openapi();
        let health_path = openapi.paths.paths.get("/health").unwrap();
        let health_get = health_path.operations.get(&PathItemType::Get).unwrap();

        assert!(health_get.responses.responses.contains_key("200"));
        assert!(health_get.responses.responses.contains_key("500"));
    }
}
