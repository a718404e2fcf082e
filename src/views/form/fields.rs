/// Input fields of the prediction form, in display order.
///
/// Each field's [`id`](FormField::id) is also its key in the request body.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    #[default]
    DistrictName,
    SoilColor,
    Nitrogen,
    Phosphorus,
    Potassium,
    Ph,
    Rainfall,
    Temperature,
    Crop,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::DistrictName,
        FormField::SoilColor,
        FormField::Nitrogen,
        FormField::Phosphorus,
        FormField::Potassium,
        FormField::Ph,
        FormField::Rainfall,
        FormField::Temperature,
        FormField::Crop,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            FormField::DistrictName => "District_Name",
            FormField::SoilColor => "Soil_color",
            FormField::Nitrogen => "Nitrogen",
            FormField::Phosphorus => "Phosphorus",
            FormField::Potassium => "Potassium",
            FormField::Ph => "pH",
            FormField::Rainfall => "Rainfall",
            FormField::Temperature => "Temperature",
            FormField::Crop => "Crop",
        }
    }

    /// Whether the field is sent as a number.
    pub fn is_numeric(&self) -> bool {
        !matches!(
            self,
            FormField::DistrictName | FormField::SoilColor | FormField::Crop
        )
    }

    /// Position within [`FormField::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Next field, wrapping to the first.
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous field, wrapping to the last.
    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
