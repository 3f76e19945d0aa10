use crate::{
    fqn::{FullQualifiedName, NamespaceAliases},
    model::element::NamedElement,
};
use edmkit_schema::node::{ActionDef, FunctionDef, ParameterDef, ReturnTypeDef};

///
/// OperationKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperationKind {
    Action,
    Function { composable: bool },
}

///
/// Operation
///
/// One action or function signature. Several signatures may share a name;
/// the binding parameter, when present, is `parameters[0]`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Operation {
    pub fqn: FullQualifiedName,
    pub kind: OperationKind,
    pub is_bound: bool,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<ReturnType>,
    pub entity_set_path: Option<String>,
}

impl Operation {
    pub(crate) fn from_action(
        namespace: &str,
        def: &ActionDef,
        aliases: &NamespaceAliases,
    ) -> Self {
        Self {
            fqn: FullQualifiedName::new(namespace, def.name.clone()),
            kind: OperationKind::Action,
            is_bound: def.is_bound,
            parameters: Parameter::from_defs(&def.parameters, aliases),
            return_type: def
                .return_type
                .as_ref()
                .map(|rt| ReturnType::from_def(rt, aliases)),
            entity_set_path: def.entity_set_path.clone(),
        }
    }

    pub(crate) fn from_function(
        namespace: &str,
        def: &FunctionDef,
        aliases: &NamespaceAliases,
    ) -> Self {
        Self {
            fqn: FullQualifiedName::new(namespace, def.name.clone()),
            kind: OperationKind::Function {
                composable: def.is_composable,
            },
            is_bound: def.is_bound,
            parameters: Parameter::from_defs(&def.parameters, aliases),
            return_type: Some(ReturnType::from_def(&def.return_type, aliases)),
            entity_set_path: def.entity_set_path.clone(),
        }
    }

    #[must_use]
    pub const fn is_action(&self) -> bool {
        matches!(self.kind, OperationKind::Action)
    }

    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self.kind, OperationKind::Function { .. })
    }

    /// Whether further path segments may follow an invocation.
    #[must_use]
    pub const fn is_composable(&self) -> bool {
        matches!(self.kind, OperationKind::Function { composable: true })
    }

    #[must_use]
    pub fn binding_parameter(&self) -> Option<&Parameter> {
        if self.is_bound {
            self.parameters.first()
        } else {
            None
        }
    }

    /// Parameters after the binding parameter (all of them when unbound).
    #[must_use]
    pub fn non_binding_parameters(&self) -> &[Parameter] {
        if self.is_bound && !self.parameters.is_empty() {
            &self.parameters[1..]
        } else {
            &self.parameters
        }
    }

    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Identity used to spot duplicate overloads: binding shape plus the
    /// positional parameter types. Names and nullability do not count.
    #[must_use]
    pub fn signature_key(&self) -> SignatureKey {
        SignatureKey {
            binding: self
                .binding_parameter()
                .map(|p| (p.type_name.clone(), p.collection)),
            parameters: self
                .non_binding_parameters()
                .iter()
                .map(|p| (p.type_name.clone(), p.collection))
                .collect(),
        }
    }
}

impl NamedElement for Operation {
    fn fqn(&self) -> &FullQualifiedName {
        &self.fqn
    }
}

///
/// SignatureKey
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SignatureKey {
    pub binding: Option<(FullQualifiedName, bool)>,
    pub parameters: Vec<(FullQualifiedName, bool)>,
}

///
/// Parameter
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_name: FullQualifiedName,
    pub nullable: bool,
    pub collection: bool,
}

impl Parameter {
    fn from_defs(defs: &[ParameterDef], aliases: &NamespaceAliases) -> Vec<Self> {
        defs.iter()
            .map(|def| Self {
                name: def.name.clone(),
                type_name: aliases.qualify(&def.type_name),
                nullable: def.nullable,
                collection: def.collection,
            })
            .collect()
    }
}

///
/// ReturnType
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReturnType {
    pub type_name: FullQualifiedName,
    pub nullable: bool,
    pub collection: bool,
}

impl ReturnType {
    fn from_def(def: &ReturnTypeDef, aliases: &NamespaceAliases) -> Self {
        Self {
            type_name: aliases.qualify(&def.type_name),
            nullable: def.nullable,
            collection: def.collection,
        }
    }
}

///
/// TESTS
///
