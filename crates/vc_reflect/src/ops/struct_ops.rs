use crate::Reflect;

/// A record with named fields.
///
/// Positions follow [`StructInfo::fields`](crate::info::StructInfo::fields).
/// Usually implemented through `#[derive(Reflect)]`.
pub trait Struct: Reflect {
    /// Field at `index`.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Field at `index`.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Number of reflected fields.
    fn field_len(&self) -> usize;

    /// Field with the declared identifier `name`.
    fn field(&self, name: &str) -> Option<&dyn Reflect> {
        let info = self.reflect_type_info().as_struct().ok()?;
        let index = info.fields().iter().position(|field| field.name() == name)?;
        self.field_at(index)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::time::SystemTime;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::{ReflectMut, ReflectRef, Struct};

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Inner {
        pub level: u8,
    }

    #[derive(Reflect, Default)]
    struct Record {
        #[reflect(tag = "record_id,omitempty")]
        pub id: u64,
        #[reflect(rename = "title")]
        pub name: String,
        hidden: bool,
        #[reflect(skip)]
        pub _scratch: core::sync::atomic::AtomicU8,
        #[reflect(embed)]
        pub inner: Inner,
        pub next: Option<Box<Record>>,
    }

    #[derive(Reflect, Debug, PartialEq)]
    struct Stamp {
        pub at: SystemTime,
        pub seen: Option<SystemTime>,
        pub history: Vec<Stamp>,
    }

    #[derive(Reflect, Default)]
    struct Wrapper<T> {
        pub items: Vec<T>,
        pub single: T,
    }

    #[test]
    fn derived_info() {
        let info = Record::type_info().as_struct().unwrap();
        assert_eq!(info.field_len(), 5);

        let id = info.field("id").unwrap();
        assert_eq!(id.tag(), Some("record_id,omitempty"));
        assert!(id.is_public());
        assert_eq!(info.field("name").unwrap().tag(), Some("title"));
        assert!(!info.field("hidden").unwrap().is_public());
        assert!(info.field("_scratch").is_none());
        assert!(info.field("inner").unwrap().is_embedded());
        assert!(info.field("next").unwrap().ty().is::<Option<Box<Record>>>());

        assert!(Record::type_path().ends_with("::Record"));
        assert_eq!(Record::type_name(), "Record");
    }

    #[test]
    fn derived_access() {
        let mut record = Record {
            id: 3,
            ..Default::default()
        };

        let ReflectRef::Struct(data) = record.reflect_ref() else {
            panic!("expected a struct");
        };
        assert_eq!(data.field_len(), 5);
        assert_eq!(data.field("id").and_then(|v| v.downcast_ref::<u64>()), Some(&3));
        assert!(data.field_at(5).is_none());

        let ReflectMut::Struct(data) = record.reflect_mut() else {
            panic!("expected a struct");
        };
        data.field_at_mut(1)
            .unwrap()
            .try_apply(&String::from("x"))
            .unwrap();
        assert_eq!(record.name, "x");
    }

    #[test]
    fn derived_default_value() {
        let record = Record::default_value().unwrap();
        assert_eq!(record.id, 0);
        assert!(record.next.is_none());

        assert_eq!(
            Stamp::default_value(),
            Some(Stamp {
                at: SystemTime::UNIX_EPOCH,
                seen: None,
                history: Vec::new(),
            })
        );

        let mut slot: Option<Stamp> = None;
        let ReflectMut::Pointer(pointer) = slot.reflect_mut() else {
            panic!("expected a pointer");
        };
        assert!(pointer.target_or_default().unwrap().is::<Stamp>());
        assert!(slot.is_some());
    }

    #[test]
    fn derived_generic() {
        assert_eq!(<Wrapper<u8>>::type_name(), "Wrapper<u8>");
        assert!(<Wrapper<u8>>::type_path().ends_with("::Wrapper<u8>"));

        let value = Wrapper::<Inner> {
            items: Vec::new(),
            single: Inner { level: 2 },
        };
        assert_eq!(
            format!("{:?}", &value as &dyn Reflect),
            "Wrapper<Inner> { items: [], single: Inner { level: 2 } }"
        );
    }
}
