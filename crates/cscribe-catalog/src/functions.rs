//! Static function tables and the header index derived from them.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::entry::{HeaderCatalogEntry, Parameter, ReferenceEntry};

const fn param(name: &'static str, ty: &'static str, description: &'static str) -> Parameter {
    Parameter {
        name,
        ty,
        description,
    }
}

/// Documented functions, in the order the lookup panel lists them.
static REFERENCES: &[ReferenceEntry] = &[
    // stdio.h
    ReferenceEntry {
        name: "printf",
        header: "stdio.h",
        prototype: "int printf(const char *format, ...);",
        description: "Writes formatted output to standard output according to a format string.",
        parameters: &[
            param("format", "const char *", "Format string with conversion specifiers."),
            param("...", "variadic", "Values consumed by the conversion specifiers."),
        ],
        return_value: "Number of characters written, or a negative value on error.",
        example: "printf(\"%d items\\n\", count);",
        notes: Some("Never pass user-controlled text as the format string."),
        related_functions: &["puts", "fprintf", "snprintf"],
    },
    ReferenceEntry {
        name: "scanf",
        header: "stdio.h",
        prototype: "int scanf(const char *format, ...);",
        description: "Reads formatted input from standard input.",
        parameters: &[
            param("format", "const char *", "Format string describing the expected input."),
            param("...", "pointers", "Addresses receiving the converted values."),
        ],
        return_value: "Number of items assigned, or EOF if input ends before the first conversion.",
        example: "int n;\nif (scanf(\"%d\", &n) != 1) { /* handle bad input */ }",
        notes: Some("Bound every %s conversion with a field width."),
        related_functions: &["fgets", "sscanf"],
    },
    ReferenceEntry {
        name: "puts",
        header: "stdio.h",
        prototype: "int puts(const char *s);",
        description: "Writes a string followed by a newline to standard output.",
        parameters: &[param("s", "const char *", "Null-terminated string to write.")],
        return_value: "A non-negative value on success, EOF on error.",
        example: "puts(\"done\");",
        notes: None,
        related_functions: &["fputs", "printf"],
    },
    ReferenceEntry {
        name: "fgets",
        header: "stdio.h",
        prototype: "char *fgets(char *s, int size, FILE *stream);",
        description: "Reads at most size - 1 characters from a stream into a buffer, stopping after a newline.",
        parameters: &[
            param("s", "char *", "Destination buffer."),
            param("size", "int", "Capacity of the destination buffer."),
            param("stream", "FILE *", "Stream to read from."),
        ],
        return_value: "s on success, NULL on end of file or error.",
        example: "char line[128];\nwhile (fgets(line, sizeof line, stdin) != NULL) { /* ... */ }",
        notes: Some("The newline is kept in the buffer when it fits."),
        related_functions: &["gets", "fputs", "getline"],
    },
    ReferenceEntry {
        name: "fopen",
        header: "stdio.h",
        prototype: "FILE *fopen(const char *path, const char *mode);",
        description: "Opens the file named by path and associates a stream with it.",
        parameters: &[
            param("path", "const char *", "File to open."),
            param("mode", "const char *", "Access mode such as \"r\", \"w\" or \"a+\"."),
        ],
        return_value: "A stream pointer, or NULL if the file could not be opened.",
        example: "FILE *fp = fopen(\"data.txt\", \"r\");\nif (fp == NULL) { perror(\"fopen\"); return 1; }",
        notes: Some("Always check the result before reading or writing."),
        related_functions: &["fclose", "fread", "fwrite", "perror"],
    },
    ReferenceEntry {
        name: "fclose",
        header: "stdio.h",
        prototype: "int fclose(FILE *stream);",
        description: "Flushes and closes a stream.",
        parameters: &[param("stream", "FILE *", "Stream returned by fopen.")],
        return_value: "0 on success, EOF on error.",
        example: "fclose(fp);",
        notes: Some("The stream must not be used after it has been closed."),
        related_functions: &["fopen", "fflush"],
    },
    ReferenceEntry {
        name: "getchar",
        header: "stdio.h",
        prototype: "int getchar(void);",
        description: "Reads the next character from standard input.",
        parameters: &[],
        return_value: "The character read as an unsigned char cast to int, or EOF.",
        example: "int c;\nwhile ((c = getchar()) != EOF) { /* ... */ }",
        notes: Some("Store the result in an int so EOF stays distinguishable."),
        related_functions: &["putchar", "fgetc"],
    },
    // stdlib.h
    ReferenceEntry {
        name: "malloc",
        header: "stdlib.h",
        prototype: "void *malloc(size_t size);",
        description: "Allocates size bytes of uninitialised heap memory.",
        parameters: &[param("size", "size_t", "Number of bytes to allocate.")],
        return_value: "Pointer to the allocation, or NULL on failure.",
        example: "int *values = malloc(n * sizeof *values);\nif (values == NULL) { return 1; }",
        notes: Some("Release the block with free once it is no longer needed."),
        related_functions: &["calloc", "realloc", "free"],
    },
    ReferenceEntry {
        name: "calloc",
        header: "stdlib.h",
        prototype: "void *calloc(size_t count, size_t size);",
        description: "Allocates zero-initialised memory for an array of count elements.",
        parameters: &[
            param("count", "size_t", "Number of elements."),
            param("size", "size_t", "Size of each element in bytes."),
        ],
        return_value: "Pointer to the zeroed allocation, or NULL on failure.",
        example: "double *grid = calloc(rows * cols, sizeof *grid);",
        notes: None,
        related_functions: &["malloc", "free"],
    },
    ReferenceEntry {
        name: "realloc",
        header: "stdlib.h",
        prototype: "void *realloc(void *ptr, size_t size);",
        description: "Resizes a previously allocated block, moving it if necessary.",
        parameters: &[
            param("ptr", "void *", "Block to resize, or NULL to allocate."),
            param("size", "size_t", "New size in bytes."),
        ],
        return_value: "Pointer to the resized block, or NULL on failure (the old block stays valid).",
        example: "int *tmp = realloc(values, 2 * n * sizeof *values);\nif (tmp != NULL) { values = tmp; }",
        notes: Some("Assign to a temporary so the original pointer is not lost on failure."),
        related_functions: &["malloc", "free"],
    },
    ReferenceEntry {
        name: "free",
        header: "stdlib.h",
        prototype: "void free(void *ptr);",
        description: "Releases a block obtained from malloc, calloc or realloc.",
        parameters: &[param("ptr", "void *", "Block to release; NULL is ignored.")],
        return_value: "None.",
        example: "free(values);\nvalues = NULL;",
        notes: Some("Freeing the same block twice is undefined behaviour."),
        related_functions: &["malloc", "calloc", "realloc"],
    },
    ReferenceEntry {
        name: "exit",
        header: "stdlib.h",
        prototype: "void exit(int status);",
        description: "Terminates the process after flushing streams and running atexit handlers.",
        parameters: &[param("status", "int", "EXIT_SUCCESS, EXIT_FAILURE or another code.")],
        return_value: "Does not return.",
        example: "exit(EXIT_FAILURE);",
        notes: None,
        related_functions: &["atexit", "abort"],
    },
    ReferenceEntry {
        name: "atoi",
        header: "stdlib.h",
        prototype: "int atoi(const char *s);",
        description: "Converts the initial portion of a string to an int.",
        parameters: &[param("s", "const char *", "String holding a decimal number.")],
        return_value: "The converted value; 0 when no conversion could be performed.",
        example: "int port = atoi(argv[1]);",
        notes: Some("Cannot report errors; strtol is the checked alternative."),
        related_functions: &["strtol", "atof"],
    },
    ReferenceEntry {
        name: "rand",
        header: "stdlib.h",
        prototype: "int rand(void);",
        description: "Returns a pseudo-random integer between 0 and RAND_MAX.",
        parameters: &[],
        return_value: "A pseudo-random integer.",
        example: "srand((unsigned) time(NULL));\nint roll = rand() % 6 + 1;",
        notes: Some("Not suitable for cryptographic use."),
        related_functions: &["srand"],
    },
    ReferenceEntry {
        name: "qsort",
        header: "stdlib.h",
        prototype: "void qsort(void *base, size_t count, size_t size, int (*compare)(const void *, const void *));",
        description: "Sorts an array in place using a caller-supplied comparison.",
        parameters: &[
            param("base", "void *", "First element of the array."),
            param("count", "size_t", "Number of elements."),
            param("size", "size_t", "Size of each element."),
            param("compare", "int (*)(const void *, const void *)", "Returns <0, 0 or >0."),
        ],
        return_value: "None.",
        example: "qsort(values, n, sizeof *values, compare_ints);",
        notes: None,
        related_functions: &["bsearch"],
    },
    // string.h
    ReferenceEntry {
        name: "strlen",
        header: "string.h",
        prototype: "size_t strlen(const char *s);",
        description: "Counts the characters of a string before its terminating null byte.",
        parameters: &[param("s", "const char *", "Null-terminated string.")],
        return_value: "Length of the string in bytes.",
        example: "size_t len = strlen(name);",
        notes: None,
        related_functions: &["strnlen", "sizeof"],
    },
    ReferenceEntry {
        name: "strcpy",
        header: "string.h",
        prototype: "char *strcpy(char *dest, const char *src);",
        description: "Copies a string, including its null terminator, into dest.",
        parameters: &[
            param("dest", "char *", "Destination buffer."),
            param("src", "const char *", "Source string."),
        ],
        return_value: "dest.",
        example: "strcpy(dest, \"hello\");",
        notes: Some("No bounds check: overflows dest when src is too long."),
        related_functions: &["strncpy", "memcpy"],
    },
    ReferenceEntry {
        name: "strncpy",
        header: "string.h",
        prototype: "char *strncpy(char *dest, const char *src, size_t n);",
        description: "Copies at most n bytes of a string into dest, padding with null bytes.",
        parameters: &[
            param("dest", "char *", "Destination buffer."),
            param("src", "const char *", "Source string."),
            param("n", "size_t", "Maximum number of bytes to copy."),
        ],
        return_value: "dest.",
        example: "strncpy(dest, src, sizeof dest - 1);\ndest[sizeof dest - 1] = '\\0';",
        notes: Some("dest is not terminated when src is at least n bytes long."),
        related_functions: &["strcpy", "memcpy"],
    },
    ReferenceEntry {
        name: "strcat",
        header: "string.h",
        prototype: "char *strcat(char *dest, const char *src);",
        description: "Appends a string to the end of dest.",
        parameters: &[
            param("dest", "char *", "Null-terminated destination with spare room."),
            param("src", "const char *", "String to append."),
        ],
        return_value: "dest.",
        example: "strcat(path, \"/bin\");",
        notes: Some("No bounds check; strncat limits the appended length."),
        related_functions: &["strncat", "strcpy"],
    },
    ReferenceEntry {
        name: "strcmp",
        header: "string.h",
        prototype: "int strcmp(const char *a, const char *b);",
        description: "Compares two strings lexicographically.",
        parameters: &[
            param("a", "const char *", "First string."),
            param("b", "const char *", "Second string."),
        ],
        return_value: "Negative, zero or positive as a sorts before, equal to or after b.",
        example: "if (strcmp(cmd, \"quit\") == 0) { return 0; }",
        notes: None,
        related_functions: &["strncmp", "memcmp"],
    },
    ReferenceEntry {
        name: "memcpy",
        header: "string.h",
        prototype: "void *memcpy(void *dest, const void *src, size_t n);",
        description: "Copies n bytes between non-overlapping memory areas.",
        parameters: &[
            param("dest", "void *", "Destination area."),
            param("src", "const void *", "Source area."),
            param("n", "size_t", "Number of bytes."),
        ],
        return_value: "dest.",
        example: "memcpy(copy, original, n * sizeof *original);",
        notes: Some("Use memmove when the areas may overlap."),
        related_functions: &["memmove", "memset"],
    },
    ReferenceEntry {
        name: "memset",
        header: "string.h",
        prototype: "void *memset(void *s, int c, size_t n);",
        description: "Fills the first n bytes of a memory area with a constant byte.",
        parameters: &[
            param("s", "void *", "Area to fill."),
            param("c", "int", "Byte value, converted to unsigned char."),
            param("n", "size_t", "Number of bytes."),
        ],
        return_value: "s.",
        example: "memset(buffer, 0, sizeof buffer);",
        notes: None,
        related_functions: &["memcpy", "calloc"],
    },
    // math.h
    ReferenceEntry {
        name: "sqrt",
        header: "math.h",
        prototype: "double sqrt(double x);",
        description: "Computes the non-negative square root.",
        parameters: &[param("x", "double", "Input value.")],
        return_value: "The square root of x; a domain error for negative x.",
        example: "double hyp = sqrt(a * a + b * b);",
        notes: Some("Link with -lm on most Unix toolchains."),
        related_functions: &["pow", "cbrt"],
    },
    ReferenceEntry {
        name: "pow",
        header: "math.h",
        prototype: "double pow(double base, double exponent);",
        description: "Raises base to the power exponent.",
        parameters: &[
            param("base", "double", "Base value."),
            param("exponent", "double", "Exponent."),
        ],
        return_value: "base raised to exponent.",
        example: "double area = 3.14159 * pow(r, 2);",
        notes: Some("Link with -lm on most Unix toolchains."),
        related_functions: &["sqrt", "exp"],
    },
    // ctype.h
    ReferenceEntry {
        name: "isdigit",
        header: "ctype.h",
        prototype: "int isdigit(int c);",
        description: "Tests whether a character is a decimal digit.",
        parameters: &[param("c", "int", "Character as unsigned char or EOF.")],
        return_value: "Non-zero if c is a digit, zero otherwise.",
        example: "if (isdigit((unsigned char) ch)) { /* ... */ }",
        notes: Some("Cast plain char arguments to unsigned char first."),
        related_functions: &["isalpha", "isspace"],
    },
    ReferenceEntry {
        name: "toupper",
        header: "ctype.h",
        prototype: "int toupper(int c);",
        description: "Converts a lowercase letter to uppercase.",
        parameters: &[param("c", "int", "Character as unsigned char or EOF.")],
        return_value: "The uppercase equivalent, or c unchanged.",
        example: "name[0] = (char) toupper((unsigned char) name[0]);",
        notes: None,
        related_functions: &["tolower"],
    },
    // time.h
    ReferenceEntry {
        name: "time",
        header: "time.h",
        prototype: "time_t time(time_t *tloc);",
        description: "Returns the current calendar time in seconds since the epoch.",
        parameters: &[param("tloc", "time_t *", "Optional location that also receives the value.")],
        return_value: "The current time, or (time_t)-1 on error.",
        example: "time_t now = time(NULL);",
        notes: None,
        related_functions: &["clock", "localtime", "difftime"],
    },
];

/// Library calls recognised for header inference but not documented.
static HEADER_ONLY: &[HeaderCatalogEntry] = &[
    HeaderCatalogEntry::new("fprintf", "stdio.h"),
    HeaderCatalogEntry::new("sprintf", "stdio.h"),
    HeaderCatalogEntry::new("snprintf", "stdio.h"),
    HeaderCatalogEntry::new("vsprintf", "stdio.h"),
    HeaderCatalogEntry::new("vsnprintf", "stdio.h"),
    HeaderCatalogEntry::new("fscanf", "stdio.h"),
    HeaderCatalogEntry::new("sscanf", "stdio.h"),
    HeaderCatalogEntry::new("gets", "stdio.h"),
    HeaderCatalogEntry::new("fputs", "stdio.h"),
    HeaderCatalogEntry::new("putchar", "stdio.h"),
    HeaderCatalogEntry::new("fgetc", "stdio.h"),
    HeaderCatalogEntry::new("fputc", "stdio.h"),
    HeaderCatalogEntry::new("fread", "stdio.h"),
    HeaderCatalogEntry::new("fwrite", "stdio.h"),
    HeaderCatalogEntry::new("fseek", "stdio.h"),
    HeaderCatalogEntry::new("ftell", "stdio.h"),
    HeaderCatalogEntry::new("rewind", "stdio.h"),
    HeaderCatalogEntry::new("fflush", "stdio.h"),
    HeaderCatalogEntry::new("perror", "stdio.h"),
    HeaderCatalogEntry::new("remove", "stdio.h"),
    HeaderCatalogEntry::new("rename", "stdio.h"),
    HeaderCatalogEntry::new("atof", "stdlib.h"),
    HeaderCatalogEntry::new("atol", "stdlib.h"),
    HeaderCatalogEntry::new("strtol", "stdlib.h"),
    HeaderCatalogEntry::new("strtoul", "stdlib.h"),
    HeaderCatalogEntry::new("strtod", "stdlib.h"),
    HeaderCatalogEntry::new("srand", "stdlib.h"),
    HeaderCatalogEntry::new("abs", "stdlib.h"),
    HeaderCatalogEntry::new("labs", "stdlib.h"),
    HeaderCatalogEntry::new("abort", "stdlib.h"),
    HeaderCatalogEntry::new("atexit", "stdlib.h"),
    HeaderCatalogEntry::new("system", "stdlib.h"),
    HeaderCatalogEntry::new("getenv", "stdlib.h"),
    HeaderCatalogEntry::new("bsearch", "stdlib.h"),
    HeaderCatalogEntry::new("strncat", "string.h"),
    HeaderCatalogEntry::new("strncmp", "string.h"),
    HeaderCatalogEntry::new("strchr", "string.h"),
    HeaderCatalogEntry::new("strrchr", "string.h"),
    HeaderCatalogEntry::new("strstr", "string.h"),
    HeaderCatalogEntry::new("strtok", "string.h"),
    HeaderCatalogEntry::new("strdup", "string.h"),
    HeaderCatalogEntry::new("memmove", "string.h"),
    HeaderCatalogEntry::new("memcmp", "string.h"),
    HeaderCatalogEntry::new("sin", "math.h"),
    HeaderCatalogEntry::new("cos", "math.h"),
    HeaderCatalogEntry::new("tan", "math.h"),
    HeaderCatalogEntry::new("fabs", "math.h"),
    HeaderCatalogEntry::new("floor", "math.h"),
    HeaderCatalogEntry::new("ceil", "math.h"),
    HeaderCatalogEntry::new("round", "math.h"),
    HeaderCatalogEntry::new("log", "math.h"),
    HeaderCatalogEntry::new("exp", "math.h"),
    HeaderCatalogEntry::new("fmod", "math.h"),
    HeaderCatalogEntry::new("isalpha", "ctype.h"),
    HeaderCatalogEntry::new("isalnum", "ctype.h"),
    HeaderCatalogEntry::new("isspace", "ctype.h"),
    HeaderCatalogEntry::new("isupper", "ctype.h"),
    HeaderCatalogEntry::new("islower", "ctype.h"),
    HeaderCatalogEntry::new("tolower", "ctype.h"),
    HeaderCatalogEntry::new("clock", "time.h"),
    HeaderCatalogEntry::new("difftime", "time.h"),
    HeaderCatalogEntry::new("localtime", "time.h"),
    HeaderCatalogEntry::new("strftime", "time.h"),
    HeaderCatalogEntry::new("assert", "assert.h"),
    HeaderCatalogEntry::new("signal", "signal.h"),
    HeaderCatalogEntry::new("raise", "signal.h"),
    HeaderCatalogEntry::new("setjmp", "setjmp.h"),
    HeaderCatalogEntry::new("longjmp", "setjmp.h"),
];

static HEADER_INDEX: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    header_map()
        .map(|entry| (entry.function_name, entry.header))
        .collect()
});

/// Returns every documented entry in catalog declaration order.
#[must_use]
pub fn references() -> &'static [ReferenceEntry] {
    REFERENCES
}

/// Iterates the full function-to-header map, documented entries first.
pub fn header_map() -> impl Iterator<Item = HeaderCatalogEntry> {
    REFERENCES
        .iter()
        .map(ReferenceEntry::header_entry)
        .chain(HEADER_ONLY.iter().copied())
}

/// Returns the header declaring `function_name`, if the catalog knows it.
#[must_use]
pub fn header_for(function_name: &str) -> Option<&'static str> {
    HEADER_INDEX.get(function_name).copied()
}
