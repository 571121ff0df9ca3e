/// Sent as its own part between the image and [`PROMPT`].
pub const PROMPT_SEPARATOR: &str = "\n\n";

/// Instruction sent with every image. The recommendation lines follow the
/// `* *Title* by *Author*: description` shape that [`super::Recommendations`] reads back.
pub const PROMPT: &str = concat!(
    "Analyze the image and describe its key visual elements.\n",
    "Infer the themes and emotional tone based on those elements.\n",
    "Recommend exactly 3 published books that relate to what's in the image.\n",
    "Verify that these 3 published books actually exist on Google Books.\n",
    "Format your entire response precisely as follows:\n\n",
    "Here's an analysis of the image and book recommendations:\n\n",
    "<Your brief analysis of image content, themes and emotional tone>\n\n",
    "* *Title1* by *Author1*: One-sentence description about why this book relates to the image.\n",
    "* *Title2* by *Author2*: One-sentence description about why this book relates to the image.\n",
    "* *Title3* by *Author3*: One-sentence description about why this book relates to the image.\n",
    "\n\n",
    "IMPORTANT FORMATTING RULES:\n",
    "1. Each book entry MUST be on its own line\n",
    "2. Each book entry MUST start with '* *' \n",
    "3. Book titles MUST be between single asterisks: *Title*\n",
    "4. Author names MUST be between single asterisks: *Author*\n",
    "5. Descriptions MUST be concise and follow the colon\n",
    "6. DO NOT add any additional text or sections beyond what's specified above\n",
);
