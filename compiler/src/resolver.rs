use log::debug;

use crate::{
    error::IntentionError,
    model::ClassName,
    traits::{Elements, ResolveError},
    types::Element,
};

/// Name of the marker annotation on routing interfaces.
pub const INTENTION: &str = "Intention";

/// Resolves the destination named by `element`'s marker.
///
/// A destination compiled in the same round cannot be looked up yet; its
/// qualified name is then recovered from the descriptor the lookup failed
/// with.
pub fn resolve_destination(elements: &dyn Elements, element: &Element) -> Result<ClassName, IntentionError> {
    let marker = element.annotation(INTENTION).ok_or_else(|| {
        IntentionError::Internal(format!("{} is not marked with @{}", element.name, INTENTION))
    })?;
    let reference = marker.path_value().ok_or_else(|| {
        IntentionError::Internal(format!("@{} on {} needs a destination type", INTENTION, element.name))
    })?;

    match elements.resolve_type(reference, element) {
        Ok(name) => Ok(name),
        Err(ResolveError::Deferred { descriptor }) => {
            debug!("destination {} of {} is deferred", descriptor, element.name);
            Ok(split_descriptor(&descriptor))
        }
        Err(ResolveError::Unknown(name)) => Err(IntentionError::Unresolved(name)),
    }
}

/// Splits a textual descriptor at its last `::`.
pub fn split_descriptor(descriptor: &str) -> ClassName {
    ClassName::from_qualified(descriptor.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Annotation, AnnotationArg, ElementKind};

    struct Fixed(Result<ClassName, ResolveError>);

    impl Elements for Fixed {
        fn package_of(&self, element: &Element) -> String {
            element.package.clone()
        }

        fn resolve_type(&self, _reference: &str, _scope: &Element) -> Result<ClassName, ResolveError> {
            self.0.clone()
        }
    }

    fn router(args: Vec<AnnotationArg>) -> Element {
        Element {
            name: "R".into(),
            package: "app".into(),
            imports: vec![],
            line: 1,
            column: 1,
            kind: ElementKind::Interface,
            annotations: vec![Annotation {
                name: INTENTION.into(),
                line: 1,
                column: 1,
                args,
            }],
            methods: vec![],
            fields: vec![],
        }
    }

    #[test]
    fn direct_resolution_is_used_when_available() {
        let elements = Fixed(Ok(ClassName::new("lib", "Target")));
        let element = router(vec![AnnotationArg::Path("Target".into())]);
        assert_eq!(
            resolve_destination(&elements, &element).unwrap(),
            ClassName::new("lib", "Target")
        );
    }

    #[test]
    fn deferred_resolution_falls_back_to_descriptor() {
        let elements = Fixed(Err(ResolveError::Deferred {
            descriptor: "app::screens::Target".into(),
        }));
        let element = router(vec![AnnotationArg::Path("Target".into())]);
        assert_eq!(
            resolve_destination(&elements, &element).unwrap(),
            ClassName::new("app::screens", "Target")
        );
    }

    #[test]
    fn unknown_destination_is_unresolved() {
        let elements = Fixed(Err(ResolveError::Unknown("Target".into())));
        let element = router(vec![AnnotationArg::Path("Target".into())]);
        assert!(matches!(
            resolve_destination(&elements, &element),
            Err(IntentionError::Unresolved(ref name)) if name == "Target"
        ));
    }

    #[test]
    fn marker_without_type_is_internal() {
        let elements = Fixed(Ok(ClassName::new("", "Unused")));
        let element = router(vec![AnnotationArg::Str("Target".into())]);
        assert!(matches!(
            resolve_destination(&elements, &element),
            Err(IntentionError::Internal(_))
        ));
    }
}
