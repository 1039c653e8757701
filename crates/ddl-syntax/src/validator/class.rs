use bitflags::bitflags;

bitflags! {
    /// Column-constraint classes seen so far on one column.
    ///
    /// Each class may appear at most once per column. `NULL` and `NOT_NULL`
    /// also exclude each other.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ConstraintClass: u32 {
        const NOT_NULL = 1 << 0;
        const NULL = 1 << 1;
        const PRIMARY = 1 << 2;
        const UNIQUE = 1 << 3;
        const CHECK = 1 << 4;
        const DEFAULT = 1 << 5;
        const COLLATE = 1 << 6;
        const REFERENCES = 1 << 7;
        const GENERATED = 1 << 8;
        const AUTOINCREMENT = 1 << 9;
        const COMMENT = 1 << 10;
        const COLUMN_FORMAT = 1 << 11;
        const ENGINE_ATTRIBUTE = 1 << 12;
        const SECONDARY_ENGINE_ATTRIBUTE = 1 << 13;
        const STORAGE = 1 << 14;
        const VISIBILITY = 1 << 15;
        const ON_UPDATE = 1 << 16;
        const DEFERRABLE = 1 << 17;

        const NULLABILITY = Self::NOT_NULL.bits() | Self::NULL.bits();
    }
}

impl ConstraintClass {
    /// Classes that block `self` from being added.
    pub fn conflicts(self) -> ConstraintClass {
        if self.intersects(ConstraintClass::NULLABILITY) {
            ConstraintClass::NULLABILITY
        } else {
            self
        }
    }

    /// Adds `class`, returning `false` when it is already present or excluded.
    pub fn insert_once(&mut self, class: ConstraintClass) -> bool {
        if self.intersects(class.conflicts()) {
            return false;
        }
        self.insert(class);
        true
    }
}
