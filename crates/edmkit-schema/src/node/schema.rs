use crate::node::{
    ActionDef, AnnotationDef, AnnotationGroupDef, ComplexTypeDef, EntityContainerDef,
    EntityTypeDef, EnumTypeDef, FunctionDef, TermDef, TypeDefinitionDef,
};
use serde::{Deserialize, Serialize};

///
/// SchemaDef
///
/// One namespace's declarations as handed over by the metadata reader.
///
/// Element lists are optional: a reader may leave a list out entirely or
/// supply it empty. The slice accessors collapse both cases to `&[]`.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SchemaDef {
    pub namespace: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_types: Option<Vec<EntityTypeDef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complex_types: Option<Vec<ComplexTypeDef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_types: Option<Vec<EnumTypeDef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_definitions: Option<Vec<TypeDefinitionDef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionDef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<FunctionDef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<Vec<TermDef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_groups: Option<Vec<AnnotationGroupDef>>,

    /// Annotations attached to the schema itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<AnnotationDef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_containers: Option<Vec<EntityContainerDef>>,

    /// Simple name of the container acting as the service default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_container: Option<String>,
}

impl SchemaDef {
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    //
    // accessors
    //

    #[must_use]
    pub fn entity_types(&self) -> &[EntityTypeDef] {
        self.entity_types.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn complex_types(&self) -> &[ComplexTypeDef] {
        self.complex_types.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn enum_types(&self) -> &[EnumTypeDef] {
        self.enum_types.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn type_definitions(&self) -> &[TypeDefinitionDef] {
        self.type_definitions.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn actions(&self) -> &[ActionDef] {
        self.actions.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn functions(&self) -> &[FunctionDef] {
        self.functions.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn terms(&self) -> &[TermDef] {
        self.terms.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn annotation_groups(&self) -> &[AnnotationGroupDef] {
        self.annotation_groups.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn annotations(&self) -> &[AnnotationDef] {
        self.annotations.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn entity_containers(&self) -> &[EntityContainerDef] {
        self.entity_containers.as_deref().unwrap_or_default()
    }

    /// Declaration of the default container, if one is named and declared.
    #[must_use]
    pub fn default_container_def(&self) -> Option<&EntityContainerDef> {
        let name = self.default_container.as_deref()?;

        self.entity_containers().iter().find(|c| c.name == name)
    }

    //
    // builders
    //

    #[must_use]
    pub fn with_entity_type(mut self, def: EntityTypeDef) -> Self {
        self.entity_types.get_or_insert_with(Vec::new).push(def);
        self
    }

    #[must_use]
    pub fn with_complex_type(mut self, def: ComplexTypeDef) -> Self {
        self.complex_types.get_or_insert_with(Vec::new).push(def);
        self
    }

    #[must_use]
    pub fn with_enum_type(mut self, def: EnumTypeDef) -> Self {
        self.enum_types.get_or_insert_with(Vec::new).push(def);
        self
    }

    #[must_use]
    pub fn with_type_definition(mut self, def: TypeDefinitionDef) -> Self {
        self.type_definitions.get_or_insert_with(Vec::new).push(def);
        self
    }

    #[must_use]
    pub fn with_action(mut self, def: ActionDef) -> Self {
        self.actions.get_or_insert_with(Vec::new).push(def);
        self
    }

    #[must_use]
    pub fn with_function(mut self, def: FunctionDef) -> Self {
        self.functions.get_or_insert_with(Vec::new).push(def);
        self
    }

    #[must_use]
    pub fn with_term(mut self, def: TermDef) -> Self {
        self.terms.get_or_insert_with(Vec::new).push(def);
        self
    }

    #[must_use]
    pub fn with_annotation_group(mut self, def: AnnotationGroupDef) -> Self {
        self.annotation_groups.get_or_insert_with(Vec::new).push(def);
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, def: AnnotationDef) -> Self {
        self.annotations.get_or_insert_with(Vec::new).push(def);
        self
    }

    #[must_use]
    pub fn with_entity_container(mut self, def: EntityContainerDef) -> Self {
        self.entity_containers.get_or_insert_with(Vec::new).push(def);
        self
    }

    /// Add a container and mark it as the default.
    #[must_use]
    pub fn with_default_container(mut self, def: EntityContainerDef) -> Self {
        self.default_container = Some(def.name.clone());
        self.with_entity_container(def)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_lists_read_the_same() {
        let absent = SchemaDef::new("Demo");
        let mut empty = SchemaDef::new("Demo");
        empty.entity_types = Some(Vec::new());

        assert!(absent.entity_types.is_none());
        assert!(absent.entity_types().is_empty());
        assert!(empty.entity_types().is_empty());
    }

    #[test]
    fn deserializes_with_missing_lists() {
        let json = r#"{
            "namespace": "Demo",
            "alias": "D",
            "entity_types": [
                { "name": "Person", "key": ["Id"],
                  "properties": [{ "name": "Id", "type": "Edm.Int32", "nullable": false }] }
            ],
            "functions": [],
            "entity_containers": [{ "name": "Container" }],
            "default_container": "Container"
        }"#;

        let schema: SchemaDef = serde_json::from_str(json).expect("schema json should decode");

        assert_eq!(schema.alias.as_deref(), Some("D"));
        assert_eq!(schema.entity_types().len(), 1);
        assert!(!schema.entity_types()[0].properties[0].nullable);
        assert_eq!(schema.functions, Some(Vec::new()));
        assert!(schema.actions.is_none());
        assert_eq!(
            schema.default_container_def().map(|c| c.name.as_str()),
            Some("Container")
        );
    }

    #[test]
    fn default_container_name_without_declaration_reads_none() {
        let mut schema = SchemaDef::new("Demo");
        schema.default_container = Some("Missing".to_string());

        assert!(schema.default_container_def().is_none());
    }
}
